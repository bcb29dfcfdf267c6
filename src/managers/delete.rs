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
use tracing::info;

use crate::activity_producer::ActivityProducer;
use crate::blob::BlobClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::redis_cache::DedupCache;

/// Archives the top-level included nodes recursively and evicts their
/// upload-dedup cache entries. Unlike the preparation managers this is not
/// traverser-driven: the metadata service performs the recursive archival
/// server-side, the engine only fans out the resulting activity events.
pub struct DeleteManager<'a> {
    metadata: &'a MetadataServiceClient,
    blob: &'a dyn BlobClient,
    activity: &'a ActivityProducer,
    dedup_cache: &'a DedupCache,
    operator: String,
    include_ids: HashSet<String>,
}

impl<'a> DeleteManager<'a> {
    pub fn new(
        metadata: &'a MetadataServiceClient,
        blob: &'a dyn BlobClient,
        activity: &'a ActivityProducer,
        dedup_cache: &'a DedupCache,
        operator: &str,
        include_ids: HashSet<String>,
    ) -> Self {
        DeleteManager {
            metadata,
            blob,
            activity,
            dedup_cache,
            operator: operator.to_string(),
            include_ids,
        }
    }

    pub fn archive_nodes(&self, rt: &tokio::runtime::Runtime) -> Result<()> {
        for node_id in &self.include_ids {
            info!(node = %node_id, "moving node into trash bin recursively");

            let node = self.metadata.get_item_by_id(node_id)?;
            self.metadata.archived_node(rt, &node, self.blob, &self.operator, self.activity)?;

            let key = DedupCache::key_for(
                node.container_code.as_deref().unwrap_or_default(),
                node.parent_path.as_deref().unwrap_or_default(),
                &node.name,
                node.zone,
            );
            rt.block_on(async {
                if self.dedup_cache.exists(&key).await? {
                    self.dedup_cache.delete(&key).await?;
                }
                Ok::<(), anyhow::Error>(())
            })?;
        }
        Ok(())
    }
}
