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

/// The kind of entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Folder,
    File,
    #[serde(rename = "Container")]
    Container,
}

/// Zone a node lives in. `0` is the staging area ("Greenroom"), any other
/// value is the approved area ("Core").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneType(pub i32);

impl ZoneType {
    pub const GREENROOM: ZoneType = ZoneType(0);
    pub const CORE: ZoneType = ZoneType(1);

    /// Human label used only in log messages, mirroring `Node.namespace`.
    pub fn namespace(&self) -> &'static str {
        if self.0 == ZoneType::CORE.0 {
            "Core"
        } else {
            "Greenroom"
        }
    }
}

/// Lifecycle status of an item in the object store.
///
/// `Registered` is a placeholder created ahead of the actual object write
/// (in progress or failed); `Active` means the write completed; `Archived`
/// means the item was soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Registered,
    Active,
    Archived,
}

/// A principal's relationship to a job, used to pick which notification
/// targets receive a fan-out message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvolvementType {
    Initiator,
    Owner,
    Receiver,
}

/// Terminal job status reported to the dataops task-stream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Succeed,
    Failed,
}

/// The pipeline operation being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineAction {
    Copy,
    Delete,
    Share,
}

/// Terminal status reported alongside a pipeline notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Failure,
}

/// Resource-lock operation type requested from the dataops lock endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceLockOperation {
    Read,
    Write,
}
