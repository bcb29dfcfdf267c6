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
use greencore::models::node::StorageInfo;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{RecordingBlobClient, file};

#[tokio::test]
async fn promotes_a_registered_node_to_active_with_its_new_location() {
    let server = MockServer::start().await;

    let mut updated = file("a-dst-id", "a.txt", Some("dst-id"), Some("dst"), 12);
    updated.status = greencore::models::enums::ItemStatus::Active;
    Mock::given(method("PUT"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": updated})))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let (node, version_id, copies) = tokio::task::spawn_blocking(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let metadata = MetadataServiceClient::new(&base_url, "minio.local:9000", "/tmp", "token");
        let blob = RecordingBlobClient::default();

        let mut dest_node = file("a-dst-id", "a.txt", Some("dst-id"), Some("dst"), 12);
        dest_node.status = greencore::models::enums::ItemStatus::Registered;

        let mut source_file = file("a-id", "a.txt", Some("src-id"), Some("src"), 12);
        source_file.storage = Some(StorageInfo {
            location_uri: "minio://minio.local:9000/gr-P/src/a.txt".to_string(),
        });

        let result = metadata
            .update_copied_file_node(&rt, "P", &dest_node, &[], &source_file, &blob)
            .unwrap();
        let copies = blob.copies.lock().unwrap().clone();
        (result.0, result.1, copies)
    })
    .await
    .unwrap();

    assert_eq!(node.status, greencore::models::enums::ItemStatus::Active);
    assert_eq!(version_id, "");
    assert_eq!(copies, vec![("core-P".to_string(), "dst/a.txt".to_string(), "gr-P".to_string(), "src/a.txt".to_string())]);
}
