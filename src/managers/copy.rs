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

use std::collections::HashMap;

use anyhow::Result;
use tracing::info;

use crate::activity_producer::ActivityProducer;
use crate::blob::BlobClient;
use crate::clients::approval::ApprovalServiceClient;
use crate::clients::dataops::DataopsServiceClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::models::node::Node;
use crate::utils::format_size;
use serde_json::json;

/// Executes a prepared copy: for each pending file, copies the backing
/// object, promotes the placeholder, carries over zip-preview metadata and
/// approval status, and emits one activity event; for folders it only
/// rewrites `system_tags`.
pub struct CopyManager<'a> {
    metadata: &'a MetadataServiceClient,
    dataops: &'a DataopsServiceClient,
    approval: Option<&'a ApprovalServiceClient>,
    activity: &'a ActivityProducer,
    approved_entities: Option<Vec<String>>,
    system_tags: Vec<String>,
    project_code: String,
    operator: String,
    blob: &'a dyn BlobClient,
}

impl<'a> CopyManager<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        metadata: &'a MetadataServiceClient,
        dataops: &'a DataopsServiceClient,
        approval: Option<&'a ApprovalServiceClient>,
        activity: &'a ActivityProducer,
        approved_entities: Option<Vec<String>>,
        system_tags: Vec<String>,
        project_code: &str,
        operator: &str,
        blob: &'a dyn BlobClient,
    ) -> Self {
        CopyManager {
            metadata,
            dataops,
            approval,
            activity,
            approved_entities,
            system_tags,
            project_code: project_code.to_string(),
            operator: operator.to_string(),
            blob,
        }
    }

    /// Transfers a cached zip-preview record from the source id to the
    /// newly-promoted node's id, if one exists.
    fn copy_zip_preview(&self, old_id: &str, new_id: &str) -> Result<()> {
        let Some(preview) = self.dataops.get_zip_preview(old_id)? else {
            return Ok(());
        };
        self.dataops.create_zip_preview(new_id, &preview)
    }

    fn update_approval_status(&self, node: &Node) -> Result<()> {
        let Some(approval) = self.approval else {
            return Ok(());
        };
        if self.approved_entities.is_none() {
            return Ok(());
        }
        approval.update_copy_status(&node.id)?;
        Ok(())
    }

    fn process_one_file(&self, rt: &tokio::runtime::Runtime, source_file: &Node, destination_file: &Node) -> Result<Node> {
        info!(
            source = %source_file.id,
            destination = %destination_file.id,
            size = %format_size(source_file.size),
            "processing source file against destination file"
        );

        let (node, version_id) = self.metadata.update_copied_file_node(
            rt,
            &self.project_code,
            destination_file,
            &self.system_tags,
            source_file,
            self.blob,
        )?;

        self.copy_zip_preview(&source_file.id, &node.id)?;
        self.metadata.update_node(
            &source_file.id,
            &json!({ "system_tags": self.system_tags, "version": version_id }),
        )?;
        rt.block_on(self.activity.log_copy(source_file, &node, &self.operator))?;
        self.update_approval_status(source_file)?;

        Ok(node)
    }

    /// Copies every pending file, replacing each entry in `registered` with
    /// its post-copy node.
    pub fn process_files(
        &self,
        rt: &tokio::runtime::Runtime,
        registered: &mut HashMap<String, Node>,
        source_file_node: &HashMap<String, Node>,
    ) -> Result<()> {
        let ids: Vec<String> = registered.keys().cloned().collect();
        for id in ids {
            let destination_file = registered.get(&id).expect("id taken from registered").clone();
            let source_file = source_file_node.get(&id).expect("source node must be present for every registered id");
            let updated = self.process_one_file(rt, source_file, &destination_file)?;
            registered.insert(id, updated);
        }
        Ok(())
    }

    pub fn process_folders(&self, source_folders: &HashMap<String, Node>) -> Result<()> {
        for item in source_folders.values() {
            self.metadata
                .update_node(&item.id, &json!({ "system_tags": self.system_tags }))?;
        }
        Ok(())
    }
}
