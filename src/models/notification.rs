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

use serde::{Deserialize, Serialize};

use crate::models::enums::{InvolvementType, PipelineAction, PipelineStatus, ResourceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Pipeline,
    #[serde(rename = "copy-request")]
    CopyRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    File,
    Folder,
}

impl From<ResourceType> for TargetType {
    fn from(value: ResourceType) -> Self {
        match value {
            ResourceType::File => TargetType::File,
            ResourceType::Folder | ResourceType::Container => TargetType::Folder,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub path: String,
    pub zone: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: TargetType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineNotification {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub recipient_username: String,
    pub involved_as: InvolvementTypeWire,
    pub action: PipelineAction,
    pub status: PipelineStatus,
    pub initiator_username: String,
    pub project_code: String,
    pub source: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Location>,
    pub targets: Vec<Target>,
}

/// Wire form of [`InvolvementType`] (field name kept distinct from the
/// engine-internal enum so the notification model can derive `Serialize`
/// directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvolvementTypeWire {
    Initiator,
    Owner,
    Receiver,
}

impl From<InvolvementType> for InvolvementTypeWire {
    fn from(value: InvolvementType) -> Self {
        match value {
            InvolvementType::Initiator => InvolvementTypeWire::Initiator,
            InvolvementType::Owner => InvolvementTypeWire::Owner,
            InvolvementType::Receiver => InvolvementTypeWire::Receiver,
        }
    }
}
