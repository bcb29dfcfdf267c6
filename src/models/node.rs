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

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::enums::{ItemStatus, ResourceType, ZoneType};

/// A single item (file, folder, or container) in a project's hierarchical
/// object store, as returned by the metadata service.
///
/// Unknown/extra fields round-trip through `extended`, matching how the
/// upstream metadata records carry per-template attribute maps the engine
/// itself never needs to interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: ResourceType,
    pub status: ItemStatus,
    pub zone: ZoneType,
    pub parent: Option<String>,
    pub parent_path: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub container_code: Option<String>,
    #[serde(default)]
    pub container_type: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub restore_path: Option<String>,
    #[serde(default)]
    pub storage: Option<StorageInfo>,
    #[serde(default)]
    pub extended: Value,
}

/// Where the node's backing object currently lives, as reported by the
/// metadata service (`minio://<endpoint>/<bucket>/<object-path>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageInfo {
    pub location_uri: String,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.entity_type == ResourceType::Folder
    }

    pub fn is_file(&self) -> bool {
        self.entity_type == ResourceType::File
    }

    pub fn is_archived(&self) -> bool {
        self.status == ItemStatus::Archived
    }

    /// Full relative path under which the node is displayed:
    /// `<parent_path>/<name>`, with any leading `/` stripped.
    pub fn display_path(&self) -> PathBuf {
        let full_path = match &self.parent_path {
            Some(parent) if !parent.is_empty() => format!("{parent}/{}", self.name),
            _ => self.name.clone(),
        };

        let path = Path::new(&full_path);
        match path.strip_prefix("/") {
            Ok(stripped) => stripped.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }

    /// Per-template attribute map nested under `extended.extra.attributes`,
    /// tolerated as free-form JSON. Absent or malformed data yields `null`.
    pub fn get_attributes(&self) -> Value {
        self.extended
            .get("extra")
            .and_then(|extra| extra.get("attributes"))
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn tags(&self) -> Vec<String> {
        self.extended
            .get("extra")
            .and_then(|extra| extra.get("tags"))
            .and_then(|tags| tags.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| t.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
