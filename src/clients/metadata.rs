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
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::activity_producer::ActivityProducer;
use crate::blob::BlobClient;
use crate::blob::copy_strategy;
use crate::error::PipelineError;
use crate::models::enums::{ItemStatus, ResourceType, ZoneType};
use crate::models::node::Node;
use crate::models::node_list::NodeList;
use crate::models::register::NodeToRegister;
use crate::utils::append_suffix_to_filepath;

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Client for the metadata service: the source of truth for node lookup,
/// tree traversal, registration, and archival.
pub struct MetadataServiceClient {
    endpoint_v1: String,
    client: reqwest::blocking::Client,
    minio_endpoint: String,
    temp_dir: String,
    access_token: String,
}

impl MetadataServiceClient {
    pub fn new(endpoint: &str, minio_endpoint: &str, temp_dir: &str, access_token: &str) -> Self {
        MetadataServiceClient {
            endpoint_v1: format!("{endpoint}/v1/"),
            client: reqwest::blocking::Client::new(),
            minio_endpoint: minio_endpoint.to_string(),
            temp_dir: temp_dir.to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn get_item_by_id(&self, node_id: &str) -> Result<Node> {
        let mut nodes = self.get_items_by_ids(&[node_id.to_string()])?;
        nodes
            .remove(node_id)
            .ok_or_else(|| anyhow!(PipelineError::NodeNotFound(node_id.to_string())))
    }

    pub fn get_items_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Node>> {
        let response = self
            .client
            .get(format!("{}items/batch/", self.endpoint_v1))
            .query(&[("ids", ids.join(","))])
            .send()?;

        if response.status() != 200 {
            bail!("unable to get nodes by ids {ids:?}");
        }

        let envelope: Envelope<Vec<Node>> = response.json()?;
        if envelope.result.len() != ids.len() {
            bail!("number of returned nodes does not match number of requested ids {ids:?}");
        }

        let nodes = NodeList::new(envelope.result);
        Ok(nodes.0.into_iter().map(|n| (n.id.clone(), n)).collect())
    }

    pub fn get_nodes_tree(&self, start_folder_id: &str) -> Result<NodeList> {
        let parent_response = self
            .client
            .get(format!("{}item/{start_folder_id}/", self.endpoint_v1))
            .send()?;
        if parent_response.status() != 200 {
            bail!("unable to get parent folder starting from \"{start_folder_id}\"");
        }
        let parent: Envelope<Node> = parent_response.json()?;
        let parent_folder = parent.result;

        let response = self
            .client
            .get(format!("{}items/search/", self.endpoint_v1))
            .bearer_auth(&self.access_token)
            .query(&[
                ("status", "ACTIVE".to_string()),
                ("zone", parent_folder.zone.0.to_string()),
                (
                    "container_code",
                    parent_folder.container_code.clone().unwrap_or_default(),
                ),
                ("parent_path", self.format_folder_path(&parent_folder)),
                ("recursive", "false".to_string()),
                ("page_size", "1000".to_string()),
            ])
            .send()?;

        if response.status() != 200 {
            bail!("unable to get nodes tree starting from \"{start_folder_id}\"");
        }

        let envelope: Envelope<Vec<Node>> = response.json()?;
        Ok(NodeList::new(envelope.result))
    }

    pub fn update_node(&self, node_id: &str, update_json: &Value) -> Result<()> {
        let response = self
            .client
            .put(format!("{}item/", self.endpoint_v1))
            .query(&[("id", node_id)])
            .json(update_json)
            .send()?;

        if response.status() != 200 {
            bail!("unable to update node with node id \"{node_id}\"");
        }
        Ok(())
    }

    /// Copies the source file's backing object into place for `node`
    /// (already registered at the destination), choosing the copy strategy
    /// by object size, then marks `node` active with the new location.
    /// Mirrors `MetadataServiceClient.update_copied_file_node` /
    /// `_copy_file_node`.
    pub fn update_copied_file_node(
        &self,
        rt: &tokio::runtime::Runtime,
        project_code: &str,
        node: &Node,
        system_tags: &[String],
        source_file: &Node,
        blob: &dyn BlobClient,
    ) -> Result<(Node, String)> {
        let file_display_path = self.format_folder_path(node);
        let location = format!("minio://{}/core-{project_code}/{file_display_path}", self.minio_endpoint);

        let src_location = source_file
            .storage
            .as_ref()
            .map(|s| s.location_uri.as_str())
            .ok_or_else(|| anyhow!("source file \"{}\" has no storage location", source_file.id))?;
        let (src_bucket, src_obj_path) = split_minio_path(src_location)?;
        let (target_bucket, target_obj_path) = split_minio_path(&location)?;

        let temp_path = Path::new(&self.temp_dir)
            .join(format!("{}", chrono::Utc::now().timestamp()))
            .join(&node.name);

        let version_id = rt.block_on(copy_strategy::copy_object(
            blob,
            &temp_path,
            node.size,
            &target_bucket,
            &target_obj_path,
            &src_bucket,
            &src_obj_path,
        ))?;

        let payload = json!({
            "status": ItemStatus::Active,
            "location_uri": location,
            "system_tags": system_tags,
            "version": version_id,
        });

        let response = self
            .client
            .put(format!("{}item/", self.endpoint_v1))
            .query(&[("id", node.id.as_str())])
            .json(&payload)
            .send()
            .context("updating copied file node")?;

        if response.status() != 200 {
            bail!("unable to update node with node id \"{}\"", node.id);
        }

        let envelope: Envelope<Node> = response.json()?;
        Ok((envelope.result, version_id))
    }

    /// Registers a node at the destination, retrying on 409 exactly as the
    /// original does: a colliding file is retried once under a
    /// timestamp-suffixed name, a colliding folder is resolved by fetching
    /// the existing one at that path.
    pub fn register_node(
        &self,
        project_code: &str,
        source_node: &Node,
        parent_node: &Node,
        item_type: ResourceType,
        status: ItemStatus,
        timestamp: Option<i64>,
        zone: ZoneType,
    ) -> Result<Node> {
        let mut payload = self.build_register_payload(project_code, source_node, parent_node, item_type, status, zone);

        let response = self
            .client
            .post(format!("{}item/", self.endpoint_v1))
            .json(&payload)
            .send()?;

        if response.status() == 409 && item_type == ResourceType::File {
            let suffix = timestamp
                .ok_or_else(|| anyhow!("file registration collided but no retry timestamp was provided"))?
                .to_string();
            payload["name"] = Value::String(append_suffix_to_filepath(&source_node.name, &suffix));

            let retry = self
                .client
                .post(format!("{}item/", self.endpoint_v1))
                .json(&payload)
                .send()?;
            retry.error_for_status_ref().map_err(anyhow::Error::from)?;
            let envelope: Envelope<Node> = retry.json()?;
            return Ok(envelope.result);
        }

        if response.status() == 409 && item_type == ResourceType::Folder {
            return self.get_node_by_full_path(
                &source_node.name,
                &self.format_folder_path(parent_node),
                project_code,
            );
        }

        response.error_for_status_ref().map_err(anyhow::Error::from)?;
        let envelope: Envelope<Node> = response.json()?;
        Ok(envelope.result)
    }

    fn build_register_payload(
        &self,
        project_code: &str,
        source_node: &Node,
        parent_node: &Node,
        item_type: ResourceType,
        status: ItemStatus,
        zone: ZoneType,
    ) -> Value {
        let mut payload = Map::new();
        payload.insert("parent".to_string(), json!(parent_node.id));
        payload.insert("parent_path".to_string(), json!(self.format_folder_path(parent_node)));
        payload.insert("type".to_string(), json!(item_type));
        payload.insert("zone".to_string(), json!(zone.0));
        payload.insert("name".to_string(), json!(source_node.name));
        payload.insert("size".to_string(), json!(source_node.size));
        payload.insert("owner".to_string(), json!(source_node.owner));
        payload.insert("container_code".to_string(), json!(project_code));
        payload.insert("container_type".to_string(), json!("project"));
        payload.insert("tags".to_string(), json!(source_node.tags()));
        payload.insert("status".to_string(), json!(status));

        let manifest = source_node.get_attributes();
        if let Value::Object(map) = &manifest {
            if let Some((template_id, attributes)) = map.iter().next() {
                payload.insert("attribute_template_id".to_string(), json!(template_id));
                payload.insert("attributes".to_string(), attributes.clone());
            }
        }

        Value::Object(payload)
    }

    pub fn register_file(&self, project_code: &str, source_node: &Node, parent_node: &Node, zone: ZoneType) -> Result<Node> {
        self.register_node(project_code, source_node, parent_node, ResourceType::File, ItemStatus::Registered, None, zone)
    }

    pub fn register_folder(&self, project_code: &str, source_node: &Node, parent_node: &Node, zone: ZoneType) -> Result<Node> {
        self.register_node(project_code, source_node, parent_node, ResourceType::Folder, ItemStatus::Active, None, zone)
    }

    /// Registers `source_node` as a file under `parent_node`, then promotes
    /// it straight to `Active` pointing at `bucket`/`key`: the upload has
    /// already happened by the time this is called, so there is no
    /// in-progress window to leave the node `Registered` for.
    pub fn register_uploaded_file(
        &self,
        project_code: &str,
        source_node: &Node,
        parent_node: &Node,
        zone: ZoneType,
        bucket: &str,
        key: &str,
    ) -> Result<Node> {
        let registered = self.register_file(project_code, source_node, parent_node, zone)?;
        let location = format!("minio://{}/{bucket}/{key}", self.minio_endpoint);

        let payload = json!({
            "status": ItemStatus::Active,
            "location_uri": location,
        });

        let response = self
            .client
            .put(format!("{}item/", self.endpoint_v1))
            .query(&[("id", registered.id.as_str())])
            .json(&payload)
            .send()
            .context("promoting uploaded file node to active")?;

        if response.status() != 200 {
            bail!("unable to update node with node id \"{}\"", registered.id);
        }

        let envelope: Envelope<Node> = response.json()?;
        Ok(envelope.result)
    }

    pub fn get_name_folder(&self, username: &str, project_code: &str, zone: ZoneType) -> Result<Node> {
        let response = self
            .client
            .get(format!("{}item/", self.endpoint_v1))
            .query(&[
                ("name", username),
                ("container_code", project_code),
                ("container_type", "project"),
            ])
            .query(&[("zone", zone.0)])
            .query(&[("status", "ACTIVE")])
            .send()?;

        if response.status() != 200 {
            bail!("folder {project_code}/{}/{username} does not exist", zone.namespace());
        }

        let envelope: Envelope<Node> = response.json()?;
        Ok(envelope.result)
    }

    pub fn get_node_by_full_path(&self, name: &str, parent_path: &str, container_code: &str) -> Result<Node> {
        let response = self
            .client
            .get(format!("{}item/", self.endpoint_v1))
            .query(&[
                ("name", name),
                ("parent_path", parent_path),
                ("container_code", container_code),
                ("container_type", "project"),
            ])
            .query(&[("zone", ZoneType::CORE.0)])
            .query(&[("status", "ACTIVE")])
            .send()?;

        if response.status() != 200 {
            bail!("item {parent_path}/{name} does not exist");
        }

        let envelope: Envelope<Node> = response.json()?;
        Ok(envelope.result)
    }

    pub fn format_folder_path(&self, node: &Node) -> String {
        match &node.parent_path {
            Some(parent) if !parent.is_empty() => format!("{parent}/{}", node.name),
            _ => node.name.clone(),
        }
    }

    pub fn move_node_to_trash(&self, node_id: &str) -> Result<Vec<Node>> {
        let response = self
            .client
            .patch(format!("{}item/", self.endpoint_v1))
            .query(&[("id", node_id), ("status", "ARCHIVED")])
            .send()?;

        if response.status() != 200 {
            bail!("unable to patch node with node id \"{node_id}\"");
        }

        let envelope: Envelope<Vec<Node>> = response.json()?;
        Ok(envelope.result)
    }

    /// Archives `source_file` and everything it expands to (a file yields
    /// itself, a folder yields its full subtree), emitting one delete
    /// activity event per file. The object-store delete is intentionally a
    /// no-op: the original service comments out the `remove_object` call on
    /// archival and this keeps that behavior rather than silently fixing
    /// it.
    pub fn archived_node(
        &self,
        rt: &tokio::runtime::Runtime,
        source_file: &Node,
        _blob: &dyn BlobClient,
        operator: &str,
        activity: &ActivityProducer,
    ) -> Result<Vec<Node>> {
        let trash_nodes = self.move_node_to_trash(&source_file.id)?;

        for item in &trash_nodes {
            if item.is_file() {
                rt.block_on(activity.log_delete(item, operator))?;
            }
        }

        Ok(trash_nodes)
    }

    /// Deletes the registered placeholders left over from a failed copy.
    /// Nodes that already completed (`ItemStatus::Active`) are left alone:
    /// the engine takes an explicit partial-commit posture rather than
    /// rolling promoted nodes back.
    pub fn remove_registered_nodes(&self, registered_file_nodes: &HashMap<String, Node>) -> Result<()> {
        for node in registered_file_nodes.values() {
            if node.status != ItemStatus::Registered {
                continue;
            }
            let response = self
                .client
                .delete(format!("{}item/", self.endpoint_v1))
                .query(&[("id", node.id.as_str())])
                .send()?;
            if response.status() != 200 {
                bail!("unable to delete node with node id \"{}\"", node.id);
            }
        }
        Ok(())
    }

    pub fn register_nodes(
        &self,
        register_file_nodes: &[NodeToRegister],
        project_code: &str,
        timestamp: i64,
    ) -> Result<HashMap<String, Node>> {
        let mut registered = HashMap::new();
        for item in register_file_nodes {
            let node = self
                .register_node(
                    project_code,
                    &item.source_node,
                    &item.destination_node,
                    ResourceType::File,
                    ItemStatus::Registered,
                    Some(timestamp),
                    ZoneType::CORE,
                )
                .with_context(|| format!("registering node \"{}\"", item.source_node.id))?;
            registered.insert(item.source_node.id.clone(), node);
        }
        Ok(registered)
    }
}

/// Splits a `minio://<endpoint>/<bucket>/<object-path>` location into
/// `(bucket, object_path)`, matching the original's
/// `location.split('//')[-1]` + `split('/', 2)` dance.
fn split_minio_path(location_uri: &str) -> Result<(String, String)> {
    let after_scheme = location_uri
        .rsplit_once("//")
        .map(|(_, rest)| rest)
        .ok_or_else(|| anyhow!("malformed minio location \"{location_uri}\""))?;

    let mut parts = after_scheme.splitn(3, '/');
    let _host = parts.next();
    let bucket = parts
        .next()
        .ok_or_else(|| anyhow!("malformed minio location \"{location_uri}\""))?;
    let object_path = parts.next().unwrap_or_default();

    Ok((bucket.to_string(), object_path.to_string()))
}
