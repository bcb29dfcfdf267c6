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
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::clients::metadata::MetadataServiceClient;
use crate::models::node::Node;
use crate::models::node_list::NodeList;
use crate::traverser::Visitor;

/// Prepares a delete: computes the WRITE lock set over every descendant of
/// the included subtrees. Produces no metadata-service side effects.
pub struct DeletePreparationManager<'a> {
    metadata: &'a MetadataServiceClient,
    include_ids: Option<HashSet<String>>,
    source_bucket: String,

    pub write_lock_paths: Vec<PathBuf>,
}

impl<'a> DeletePreparationManager<'a> {
    pub fn new(metadata: &'a MetadataServiceClient, include_ids: Option<HashSet<String>>, source_bucket: &str) -> Self {
        DeletePreparationManager {
            metadata,
            include_ids,
            source_bucket: source_bucket.to_string(),
            write_lock_paths: Vec::new(),
        }
    }

    fn lock_path(&self, node: &Node) -> PathBuf {
        PathBuf::from(&self.source_bucket).join(node.display_path())
    }
}

impl Visitor for DeletePreparationManager<'_> {
    fn get_tree(&mut self, folder: &Node) -> Result<NodeList> {
        self.metadata.get_nodes_tree(&folder.id)
    }

    fn exclude_nodes(&mut self, nodes: &NodeList) -> Result<HashSet<String>> {
        let Some(include) = &self.include_ids else {
            return Ok(HashSet::new());
        };

        let ids = nodes.ids();
        if !include.is_subset(&ids) {
            return Ok(HashSet::new());
        }

        Ok(ids.difference(include).cloned().collect())
    }

    fn process_file(&mut self, source_file: &Node, destination_path: &Node) -> Result<()> {
        info!(file = %source_file.id, dest = %destination_path.id, "processing source file against destination path");
        self.write_lock_paths.push(self.lock_path(source_file));
        Ok(())
    }

    fn process_folder(&mut self, source_folder: &Node, destination_parent: &Node) -> Result<Node> {
        info!(folder = %source_folder.id, dest = %destination_parent.id, "processing source folder against destination parent path");
        self.write_lock_paths.push(self.lock_path(source_folder));
        Ok(destination_parent.clone())
    }
}
