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

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

/// Client for the dataset service: resolves a dataset version id to its
/// record, used by the share driver.
pub struct DatasetServiceClient {
    endpoint_v1: String,
    client: reqwest::blocking::Client,
}

impl DatasetServiceClient {
    pub fn new(endpoint: &str) -> Self {
        DatasetServiceClient {
            endpoint_v1: format!("{endpoint}/v1/"),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn get_dataset_version(&self, version_id: Uuid) -> Result<Value> {
        let result = self
            .client
            .get(format!("{}dataset/versions/{version_id}/", self.endpoint_v1))
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("failed to get dataset version {version_id}"));

        if result.is_err() {
            error!("failed to get dataset version {version_id}");
        }

        Ok(result?.json()?)
    }
}
