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

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::clients::metadata::MetadataServiceClient;
use crate::models::enums::{ItemStatus, ResourceType, ZoneType};
use crate::models::node::Node;
use crate::models::node_list::NodeList;
use crate::models::register::NodeToRegister;
use crate::traverser::Visitor;

/// Prepares a copy: computes the READ lock set and, for every approved
/// file, an in-memory registration plan; destination folders are created
/// eagerly (idempotently — a 409 reuses the existing folder).
pub struct CopyPreparationManager<'a> {
    metadata: &'a MetadataServiceClient,
    approved_entities: Option<HashSet<String>>,
    include_ids: Option<HashSet<String>>,
    project_code: String,
    source_bucket: String,

    pub register_file_nodes: Vec<NodeToRegister>,
    pub source_file_node: HashMap<String, Node>,
    pub source_folder_nodes: HashMap<String, Node>,
    pub read_lock_paths: Vec<PathBuf>,
}

impl<'a> CopyPreparationManager<'a> {
    pub fn new(
        metadata: &'a MetadataServiceClient,
        approved_entities: Option<HashSet<String>>,
        include_ids: Option<HashSet<String>>,
        project_code: &str,
        source_bucket: &str,
    ) -> Self {
        CopyPreparationManager {
            metadata,
            approved_entities,
            include_ids,
            project_code: project_code.to_string(),
            source_bucket: source_bucket.to_string(),
            register_file_nodes: Vec::new(),
            source_file_node: HashMap::new(),
            source_folder_nodes: HashMap::new(),
            read_lock_paths: Vec::new(),
        }
    }

    fn is_node_approved(&self, node: &Node) -> bool {
        match &self.approved_entities {
            None => true,
            Some(approved) => approved.contains(&node.id),
        }
    }

    fn lock_path(&self, node: &Node) -> PathBuf {
        PathBuf::from(&self.source_bucket).join(node.display_path())
    }
}

impl Visitor for CopyPreparationManager<'_> {
    fn get_tree(&mut self, folder: &Node) -> Result<NodeList> {
        self.metadata.get_nodes_tree(&folder.id)
    }

    /// Composes the approved-entities filter and the include-ids filter by
    /// intersection: an id is excluded if either filter (when supplied)
    /// drops it. The include filter only applies while the current level's
    /// ids are a subset of the include set, matching the top-level-only
    /// include semantics.
    fn exclude_nodes(&mut self, nodes: &NodeList) -> Result<HashSet<String>> {
        let ids = nodes.ids();
        let mut excluded: HashSet<String> = HashSet::new();

        if let Some(approved) = &self.approved_entities {
            excluded.extend(ids.difference(approved).cloned());
        }

        if let Some(include) = &self.include_ids {
            if include.is_subset(&ids) {
                excluded.extend(ids.difference(include).cloned());
            }
        }

        Ok(excluded)
    }

    fn process_file(&mut self, source_file: &Node, destination_folder: &Node) -> Result<()> {
        if !self.is_node_approved(source_file) {
            return Ok(());
        }

        info!(file = %source_file.id, dest = %destination_folder.id, "processing source file against destination");

        self.read_lock_paths.push(self.lock_path(source_file));
        self.register_file_nodes
            .push(NodeToRegister::new(source_file.clone(), destination_folder.clone()));
        self.source_file_node.insert(source_file.id.clone(), source_file.clone());
        Ok(())
    }

    fn process_folder(&mut self, source_folder: &Node, destination_parent: &Node) -> Result<Node> {
        info!(folder = %source_folder.id, dest = %destination_parent.id, "processing source folder against destination parent");

        let node = self.metadata.register_node(
            &self.project_code,
            source_folder,
            destination_parent,
            ResourceType::Folder,
            ItemStatus::Active,
            None,
            ZoneType::CORE,
        )?;

        self.source_folder_nodes.insert(source_folder.id.clone(), source_folder.clone());
        self.read_lock_paths.push(self.lock_path(source_folder));
        Ok(node)
    }
}
