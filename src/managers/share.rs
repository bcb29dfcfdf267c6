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
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::blob::BlobClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::models::enums::{ItemStatus, ResourceType, ZoneType};
use crate::models::node::Node;
use crate::models::node_list::NodeList;
use crate::traverser::Visitor;

/// Walks a local directory tree (produced by extracting a downloaded
/// dataset version archive) and mirrors it into a project's green zone:
/// every folder is registered directly, every file is uploaded to the
/// object store and registered against the resulting location.
///
/// Unlike the remote-tree managers, `get_tree` reads local directory
/// entries rather than calling the metadata service; nodes carry the local
/// absolute path in `parent_path`/`name` until they are registered, at
/// which point the registered `Node` (with a real id) becomes the
/// recursion target, exactly as for the remote managers.
pub struct ShareDatasetManager<'a> {
    metadata: &'a MetadataServiceClient,
    blob: &'a dyn BlobClient,
    rt: &'a tokio::runtime::Runtime,
    project_code: String,
    zone: ZoneType,
    operator: String,
}

impl<'a> ShareDatasetManager<'a> {
    pub fn new(
        metadata: &'a MetadataServiceClient,
        blob: &'a dyn BlobClient,
        rt: &'a tokio::runtime::Runtime,
        project_code: &str,
        zone: ZoneType,
        operator: &str,
    ) -> Self {
        ShareDatasetManager {
            metadata,
            blob,
            rt,
            project_code: project_code.to_string(),
            zone,
            operator: operator.to_string(),
        }
    }

    fn local_path(folder: &Node) -> std::path::PathBuf {
        Path::new(folder.parent_path.as_deref().unwrap_or_default()).join(&folder.name)
    }
}

pub(crate) fn fs_node(path: &Path) -> Result<Node> {
    let name = path
        .file_name()
        .context("local path has no file name")?
        .to_string_lossy()
        .to_string();
    let parent_path = path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let metadata = std::fs::metadata(path)?;

    Ok(Node {
        id: path.to_string_lossy().to_string(),
        name,
        entity_type: if metadata.is_dir() { ResourceType::Folder } else { ResourceType::File },
        status: ItemStatus::Active,
        zone: ZoneType::GREENROOM,
        parent: None,
        parent_path: Some(parent_path),
        size: metadata.len(),
        container_code: None,
        container_type: None,
        owner: None,
        restore_path: None,
        storage: None,
        extended: Value::Null,
    })
}

impl Visitor for ShareDatasetManager<'_> {
    fn get_tree(&mut self, folder: &Node) -> Result<NodeList> {
        let local_path = Self::local_path(folder);
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&local_path).with_context(|| format!("reading {}", local_path.display()))? {
            entries.push(fs_node(&entry?.path())?);
        }
        Ok(NodeList::new(entries))
    }

    fn exclude_nodes(&mut self, _nodes: &NodeList) -> Result<HashSet<String>> {
        Ok(HashSet::new())
    }

    fn process_file(&mut self, source_file: &Node, destination_parent: &Node) -> Result<()> {
        info!(file = %source_file.name, dest = %destination_parent.id, "uploading local file into destination zone");

        let local_path = Self::local_path(source_file);
        let bucket = format!("gr-{}", self.project_code);
        let key = destination_parent.display_path().join(&source_file.name);
        let key = key.to_string_lossy().to_string();

        self.rt.block_on(self.blob.upload_object(&bucket, &key, &local_path))?;

        let mut owned_file = source_file.clone();
        owned_file.owner = Some(self.operator.clone());
        self.metadata
            .register_uploaded_file(&self.project_code, &owned_file, destination_parent, self.zone, &bucket, &key)?;
        Ok(())
    }

    fn process_folder(&mut self, source_folder: &Node, destination_parent: &Node) -> Result<Node> {
        info!(folder = %source_folder.name, dest = %destination_parent.id, "registering destination folder");
        let mut owned_folder = source_folder.clone();
        owned_folder.owner = Some(self.operator.clone());
        self.metadata
            .register_folder(&self.project_code, &owned_folder, destination_parent, self.zone)
    }
}
