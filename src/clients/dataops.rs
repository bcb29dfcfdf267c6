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

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::models::enums::{JobStatus, ResourceLockOperation};
use crate::models::job::TaskStreamUpdate;

#[derive(Serialize)]
struct LockBulkRequest<'a> {
    resource_keys: &'a [String],
    operation: ResourceLockOperation,
}

#[derive(Deserialize)]
struct ZipPreview {
    archive_preview: Value,
}

#[derive(Serialize)]
struct CreateZipPreviewRequest<'a> {
    file_id: &'a str,
    archive_preview: &'a Value,
}

/// Client for the dataops service: resource locking, task-stream job
/// updates, and zip-preview records.
pub struct DataopsServiceClient {
    endpoint_v1: String,
    endpoint_v2: String,
    client: reqwest::blocking::Client,
}

impl DataopsServiceClient {
    pub fn new(endpoint: &str) -> Self {
        DataopsServiceClient {
            endpoint_v1: format!("{endpoint}/v1"),
            endpoint_v2: format!("{endpoint}/v2"),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Resource-lock keys are `<bucket>/<display-path>` paths, already
    /// formatted by the caller.
    pub fn lock_resources(&self, resource_keys: &[PathBuf], operation: ResourceLockOperation) -> Result<()> {
        let keys: Vec<String> = resource_keys.iter().map(|p| p.to_string_lossy().to_string()).collect();
        info!(?operation, ?keys, "locking resource keys");

        let response = self
            .client
            .post(format!("{}/resource/lock/bulk", self.endpoint_v2))
            .json(&LockBulkRequest {
                resource_keys: &keys,
                operation,
            })
            .send()?;

        if response.status() != 200 {
            bail!("unable to lock resource keys: {keys:?}");
        }
        Ok(())
    }

    pub fn unlock_resources(&self, resource_keys: &[PathBuf], operation: ResourceLockOperation) -> Result<()> {
        let keys: Vec<String> = resource_keys.iter().map(|p| p.to_string_lossy().to_string()).collect();
        info!(?operation, ?keys, "unlocking resource keys");

        let response = self
            .client
            .delete(format!("{}/resource/lock/bulk", self.endpoint_v2))
            .json(&LockBulkRequest {
                resource_keys: &keys,
                operation,
            })
            .send()?;

        let status = response.status().as_u16();
        if status != 200 && status != 400 {
            bail!("unable to unlock resource keys: {keys:?}");
        }
        Ok(())
    }

    pub fn update_job(&self, update: &TaskStreamUpdate) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/task-stream/", self.endpoint_v1))
            .json(update)
            .send()?;

        if response.status() != 200 {
            bail!("unable to update job \"{}\"", update.job_id);
        }
        Ok(())
    }

    pub fn get_zip_preview(&self, file_id: &str) -> Result<Option<Value>> {
        let response = self
            .client
            .get(format!("{}/archive", self.endpoint_v1))
            .query(&[("file_id", file_id)])
            .send()?;

        if response.status() == 404 {
            return Ok(None);
        }
        if response.status() != 200 {
            bail!("unable to get zip preview for id \"{file_id}\"");
        }

        let preview: ZipPreview = response.json()?;
        Ok(Some(preview.archive_preview))
    }

    pub fn create_zip_preview(&self, file_id: &str, archive_preview: &Value) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/archive", self.endpoint_v1))
            .json(&CreateZipPreviewRequest { file_id, archive_preview })
            .send()?;

        if response.status() != 200 {
            bail!("unable to create zip preview for id \"{file_id}\"");
        }
        Ok(())
    }
}

pub type DataopsJobStatus = JobStatus;
