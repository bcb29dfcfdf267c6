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
use serde::Deserialize;

use crate::models::node::Node;

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Client for the project service: resolves a `container_code` to the
/// project's root node.
pub struct ProjectServiceClient {
    endpoint_v1: String,
    client: reqwest::blocking::Client,
}

impl ProjectServiceClient {
    pub fn new(endpoint: &str) -> Self {
        ProjectServiceClient {
            endpoint_v1: format!("{endpoint}/v1"),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn get_project_by_code(&self, project_code: &str) -> Result<Node> {
        let response = self
            .client
            .get(format!("{}/project/{project_code}/", self.endpoint_v1))
            .send()?;

        if response.status() != 200 {
            bail!("unable to get project with code \"{project_code}\"");
        }

        let envelope: Envelope<Node> = response.json()?;
        Ok(envelope.result)
    }
}
