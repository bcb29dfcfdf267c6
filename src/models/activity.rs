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

use serde::Serialize;

use crate::models::node::Node;

/// One field-level change recorded against an activity event, e.g. a path
/// or id rename produced by a copy.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityChange {
    pub item_property: String,
    pub old_value: String,
    pub new_value: String,
}

/// A single row appended to the `metadata.items.activity` stream.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub activity_type: String,
    pub activity_time: String,
    pub item_id: String,
    pub item_type: String,
    pub item_name: String,
    pub item_parent_path: String,
    pub container_code: String,
    pub container_type: String,
    pub zone: i32,
    pub user: String,
    pub imported_from: String,
    pub changes: Vec<ActivityChange>,
}

impl ActivityEvent {
    /// Builds the `copy` event: `item_parent_path` stays as-is, `changes`
    /// records the path and id rename from source to destination.
    pub fn for_copy(source: &Node, destination: &Node, operator: &str, now_rfc3339: String) -> Self {
        ActivityEvent {
            activity_type: "copy".to_string(),
            activity_time: now_rfc3339,
            item_id: source.id.clone(),
            item_type: format!("{:?}", source.entity_type).to_lowercase(),
            item_name: source.name.clone(),
            item_parent_path: source.parent_path.clone().unwrap_or_default(),
            container_code: source.container_code.clone().unwrap_or_default(),
            container_type: source.container_type.clone().unwrap_or_default(),
            zone: source.zone.0,
            user: operator.to_string(),
            imported_from: String::new(),
            changes: vec![
                ActivityChange {
                    item_property: "path".to_string(),
                    old_value: source.display_path().to_string_lossy().to_string(),
                    new_value: destination.display_path().to_string_lossy().to_string(),
                },
                ActivityChange {
                    item_property: "id".to_string(),
                    old_value: source.id.clone(),
                    new_value: destination.id.clone(),
                },
            ],
        }
    }

    /// Builds the `delete` event: `item_parent_path` is overridden with the
    /// node's pre-archival restore path, `changes` is empty.
    pub fn for_delete(node: &Node, operator: &str, now_rfc3339: String) -> Self {
        ActivityEvent {
            activity_type: "delete".to_string(),
            activity_time: now_rfc3339,
            item_id: node.id.clone(),
            item_type: format!("{:?}", node.entity_type).to_lowercase(),
            item_name: node.name.clone(),
            item_parent_path: node.restore_path.clone().unwrap_or_default(),
            container_code: node.container_code.clone().unwrap_or_default(),
            container_type: node.container_type.clone().unwrap_or_default(),
            zone: node.zone.0,
            user: operator.to_string(),
            imported_from: String::new(),
            changes: Vec::new(),
        }
    }
}
