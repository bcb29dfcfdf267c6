// greencore is a pipeline worker for copy/delete/share operations over a
// project's hierarchical object store.
// Copyright (C) 2026  greencore contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::collections::HashSet;

use anyhow::Result;

use crate::models::node::Node;
use crate::models::node_list::NodeList;

/// Per-operation strategy the traverser drives. Each manager (copy
/// preparation, copy, delete preparation, delete, share) implements this
/// the same way the teacher's archiver drives its own node-processing
/// callback over a walked tree, just against a remote tree instead of a
/// local filesystem.
pub trait Visitor {
    /// Fetches one level of children under `folder`.
    fn get_tree(&mut self, folder: &Node) -> Result<NodeList>;

    /// Computes the subset of `nodes`' ids to keep at this level. Default:
    /// no filtering.
    fn exclude_nodes(&mut self, _nodes: &NodeList) -> Result<HashSet<String>> {
        Ok(HashSet::new())
    }

    fn process_file(&mut self, src_file: &Node, dest_parent: &Node) -> Result<()>;

    /// Returns the destination counterpart to recurse into.
    fn process_folder(&mut self, src_folder: &Node, dest_parent: &Node) -> Result<Node>;
}

/// Drives a pre-order walk of `source_folder`, invoking `visitor`'s hooks
/// for every non-archived file and folder. Depth-first, no additional
/// sorting beyond what the metadata service returns.
pub fn traverse(visitor: &mut dyn Visitor, source_folder: &Node, destination_parent: &Node) -> Result<()> {
    let children = visitor.get_tree(source_folder)?;
    let excluded = visitor.exclude_nodes(&children)?;

    for child in children.iter() {
        if child.is_archived() || excluded.contains(&child.id) {
            continue;
        }

        if child.is_file() {
            visitor.process_file(child, destination_parent)?;
        } else if child.is_folder() {
            let dest_counterpart = visitor.process_folder(child, destination_parent)?;
            traverse(visitor, child, &dest_counterpart)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{ItemStatus, ResourceType, ZoneType};
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn node(id: &str, name: &str, entity_type: ResourceType, status: ItemStatus) -> Node {
        Node {
            id: id.to_string(),
            name: name.to_string(),
            entity_type,
            status,
            zone: ZoneType::GREENROOM,
            parent: None,
            parent_path: None,
            size: 0,
            container_code: None,
            container_type: None,
            owner: None,
            restore_path: None,
            storage: None,
            extended: Value::Null,
        }
    }

    struct RecordingVisitor {
        tree: HashMap<String, Vec<Node>>,
        visited_files: RefCell<Vec<String>>,
        visited_folders: RefCell<Vec<String>>,
    }

    impl Visitor for RecordingVisitor {
        fn get_tree(&mut self, folder: &Node) -> Result<NodeList> {
            Ok(NodeList::new(self.tree.get(&folder.id).cloned().unwrap_or_default()))
        }

        fn process_file(&mut self, src_file: &Node, _dest_parent: &Node) -> Result<()> {
            self.visited_files.borrow_mut().push(src_file.id.clone());
            Ok(())
        }

        fn process_folder(&mut self, src_folder: &Node, _dest_parent: &Node) -> Result<Node> {
            self.visited_folders.borrow_mut().push(src_folder.id.clone());
            Ok(src_folder.clone())
        }
    }

    #[test]
    fn test_visits_every_descendant_before_recursing() {
        let root = node("root", "root", ResourceType::Folder, ItemStatus::Active);
        let sub = node("sub", "sub", ResourceType::Folder, ItemStatus::Active);
        let a = node("a", "a.txt", ResourceType::File, ItemStatus::Active);
        let b = node("b", "b.txt", ResourceType::File, ItemStatus::Active);

        let mut tree = HashMap::new();
        tree.insert("root".to_string(), vec![a.clone(), sub.clone()]);
        tree.insert("sub".to_string(), vec![b.clone()]);

        let mut visitor = RecordingVisitor {
            tree,
            visited_files: RefCell::new(Vec::new()),
            visited_folders: RefCell::new(Vec::new()),
        };

        traverse(&mut visitor, &root, &root).unwrap();

        assert_eq!(*visitor.visited_files.borrow(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(*visitor.visited_folders.borrow(), vec!["sub".to_string()]);
    }

    #[test]
    fn test_skips_archived_nodes() {
        let root = node("root", "root", ResourceType::Folder, ItemStatus::Active);
        let archived = node("arch", "gone.txt", ResourceType::File, ItemStatus::Archived);

        let mut tree = HashMap::new();
        tree.insert("root".to_string(), vec![archived]);

        let mut visitor = RecordingVisitor {
            tree,
            visited_files: RefCell::new(Vec::new()),
            visited_folders: RefCell::new(Vec::new()),
        };

        traverse(&mut visitor, &root, &root).unwrap();

        assert!(visitor.visited_files.borrow().is_empty());
    }
}
