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

use greencore::clients::metadata::MetadataServiceClient;
use greencore::models::enums::{ItemStatus, ResourceType, ZoneType};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{file, folder};

#[tokio::test]
async fn colliding_file_registration_retries_under_a_timestamp_suffixed_name() {
    let server = MockServer::start().await;

    let renamed = file("a-id-2", "a_171234.txt", Some("dst-id"), Some("dst"), 1);
    Mock::given(method("POST"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(409))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": renamed})))
        .with_priority(2)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let source = file("a-id", "a.txt", Some("src-id"), Some("src"), 1);
        let dst = folder("dst-id", "dst", None, Some(""));

        metadata.register_node(
            "P",
            &source,
            &dst,
            ResourceType::File,
            ItemStatus::Registered,
            Some(171234),
            ZoneType::CORE,
        )
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.name, "a_171234.txt");
}

#[tokio::test]
async fn colliding_folder_registration_reuses_the_existing_folder_at_that_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let existing = folder("sub-existing-id", "sub", Some("dst-id"), Some("dst"));
    Mock::given(method("GET"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": existing})))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let source = folder("sub-id", "sub", Some("src-id"), Some("src"));
        let dst = folder("dst-id", "dst", None, Some(""));

        metadata.register_node("P", &source, &dst, ResourceType::Folder, ItemStatus::Active, None, ZoneType::CORE)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.id, "sub-existing-id");
}
