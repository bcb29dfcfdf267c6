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

use std::path::Path;

use greencore::clients::metadata::MetadataServiceClient;
use greencore::managers::ShareDatasetManager;
use greencore::models::enums::{ItemStatus, ResourceType, ZoneType};
use greencore::models::node::Node;
use greencore::traverser;
use serde_json::json;
use wiremock::matchers::{method, path as path_matcher};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{RecordingBlobClient, folder};

/// Mirrors `managers::share::fs_node` for a local filesystem entry, since
/// that helper is private to the crate.
fn local_fs_node(path: &Path) -> Node {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let parent_path = path.parent().unwrap().to_string_lossy().to_string();
    let metadata = std::fs::metadata(path).unwrap();

    Node {
        id: path.to_string_lossy().to_string(),
        name,
        entity_type: if metadata.is_dir() { ResourceType::Folder } else { ResourceType::File },
        status: ItemStatus::Active,
        zone: ZoneType::GREENROOM,
        parent: None,
        parent_path: Some(parent_path),
        size: metadata.len(),
        container_code: None,
        container_type: None,
        owner: None,
        restore_path: None,
        storage: None,
        extended: json!(null),
    }
}

#[tokio::test]
async fn mirrors_a_local_directory_tree_into_the_destination_zone() {
    let server = MockServer::start().await;

    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("f1.txt"), b"one").unwrap();
    std::fs::create_dir(tmp.path().join("d")).unwrap();
    std::fs::write(tmp.path().join("d").join("f2.txt"), b"two").unwrap();

    let registered_folder = folder("sub-dst-id", "d", Some("dst-id"), Some("dst"));
    Mock::given(method("POST"))
        .and(path_matcher("/v1/item/"))
        .respond_with(move |req: &wiremock::Request| {
            let body: serde_json::Value = req.body_json().unwrap();
            if body["type"] == "folder" {
                ResponseTemplate::new(200).set_body_json(json!({"result": registered_folder.clone()}))
            } else {
                let name = body["name"].as_str().unwrap().to_string();
                let registered_file = folder("file-dst-id", &name, Some("dst-id"), Some("dst"));
                ResponseTemplate::new(200).set_body_json(json!({"result": registered_file}))
            }
        })
        .mount(&server)
        .await;

    let promoted_file = folder("file-dst-id", "promoted", Some("dst-id"), Some("dst"));
    Mock::given(method("PUT"))
        .and(path_matcher("/v1/item/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": promoted_file})))
        .expect(2)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let root = tmp.path().to_path_buf();
    let (uploads, upload_count) = tokio::task::spawn_blocking(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let blob = RecordingBlobClient::default();

        let source_root = local_fs_node(&root);
        let dst = folder("dst-id", "dst", None, Some(""));

        let mut manager = ShareDatasetManager::new(&metadata, &blob, &rt, "destProj", ZoneType::GREENROOM, "operator");
        traverser::traverse(&mut manager, &source_root, &dst).unwrap();

        let uploads = blob.uploads.lock().unwrap().clone();
        (uploads.clone(), uploads.len())
    })
    .await
    .unwrap();

    assert_eq!(upload_count, 2);
    assert!(uploads.iter().all(|(bucket, _)| bucket == "gr-destProj"));

    // The `.expect(2)` guard on the PUT mock above, verified on `server`'s
    // drop, asserts both uploaded files were promoted to active.
}
