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

use greencore::clients::metadata::MetadataServiceClient;
use greencore::models::enums::ItemStatus;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::file;

#[tokio::test]
async fn sweep_only_deletes_placeholders_still_registered() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/item/"))
        .and(query_param("id", "still-registered"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");

        let mut registered = file("still-registered", "a.txt", Some("dst-id"), Some("dst"), 1);
        registered.status = ItemStatus::Registered;

        let mut promoted = file("already-active", "b.txt", Some("dst-id"), Some("dst"), 2);
        promoted.status = ItemStatus::Active;

        let mut nodes = HashMap::new();
        nodes.insert(registered.id.clone(), registered);
        nodes.insert(promoted.id.clone(), promoted);

        metadata.remove_registered_nodes(&nodes)
    })
    .await
    .unwrap()
    .unwrap();

    // wiremock's `.expect(1)` guard, verified on drop, asserts the active
    // node's placeholder was never targeted for deletion.
}
