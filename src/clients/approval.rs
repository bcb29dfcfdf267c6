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

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct CopyStatusRequest<'a> {
    entities: [&'a str; 1],
    copy_status: &'a str,
}

#[derive(Deserialize)]
struct Envelope {
    result: Vec<Value>,
}

/// Client for the approval service: updates the copy status of entities
/// tied to a copy request once the engine has copied them.
pub struct ApprovalServiceClient {
    endpoint: String,
    request_id: String,
    client: reqwest::blocking::Client,
}

impl ApprovalServiceClient {
    pub fn new(endpoint: &str, request_id: &str) -> Self {
        ApprovalServiceClient {
            endpoint: format!("{endpoint}/v1"),
            request_id: request_id.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn update_copy_status(&self, entity_id: &str) -> Result<Vec<Value>> {
        let response = self
            .client
            .put(format!("{}/request/{}/copy-status", self.endpoint, self.request_id))
            .json(&CopyStatusRequest {
                entities: [entity_id],
                copy_status: "copied",
            })
            .send()?;

        if response.status() != 200 {
            bail!("unable to update copy status for {entity_id}");
        }

        let envelope: Envelope = response.json()?;
        if envelope.result.is_empty() {
            bail!("unable to update copy status for {entity_id}, entity is not found");
        }
        Ok(envelope.result)
    }
}
