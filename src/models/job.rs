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

use crate::models::enums::JobStatus;

/// Describes the identity of a pipeline run, threaded through every
/// task-stream update and lock/unlock call it makes.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub session_id: String,
    pub job_id: String,
    pub container_code: String,
    pub action_type: String,
    pub operator: String,
}

/// Payload posted to the dataops `task-stream` endpoint to report job
/// progress.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStreamUpdate {
    pub session_id: String,
    pub job_id: String,
    pub target_names: Vec<String>,
    pub target_type: String,
    pub container_code: String,
    pub container_type: &'static str,
    pub action_type: String,
    pub status: JobStatus,
}

impl JobContext {
    pub fn task_stream_update(
        &self,
        target_names: Vec<String>,
        target_type: String,
        status: JobStatus,
    ) -> TaskStreamUpdate {
        TaskStreamUpdate {
            session_id: self.session_id.clone(),
            job_id: self.job_id.clone(),
            target_names,
            target_type,
            container_code: self.container_code.clone(),
            container_type: "project",
            action_type: self.action_type.clone(),
            status,
        }
    }
}
