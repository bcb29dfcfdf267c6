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

use std::collections::HashSet;
use std::path::PathBuf;

use greencore::clients::metadata::MetadataServiceClient;
use greencore::managers::CopyPreparationManager;
use greencore::traverser;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{file, folder};

async fn mount_tree_endpoints(server: &MockServer) {
    let src = folder("src-id", "src", Some("root-id"), Some(""));
    let sub = folder("sub-id", "sub", Some("src-id"), Some("src"));
    let a_txt = file("a-id", "a.txt", Some("src-id"), Some("src"), 12);
    let b_txt = file("b-id", "b.txt", Some("sub-id"), Some("src/sub"), 34);

    Mock::given(method("GET"))
        .and(path("/v1/item/src-id/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": src})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items/search/"))
        .and(query_param("parent_path", "src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [a_txt, sub.clone()]})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/item/sub-id/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": sub})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items/search/"))
        .and(query_param("parent_path", "src/sub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [b_txt]})))
        .mount(server)
        .await;

    let sub_registered = folder("sub-dst-id", "sub", Some("dst-id"), Some("dst"));
    Mock::given(method("POST"))
        .and(path("/v1/item/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": sub_registered})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn prepares_read_locks_and_registration_plan_for_every_descendant() {
    let server = MockServer::start().await;
    mount_tree_endpoints(&server).await;

    let base_url = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let src = folder("src-id", "src", Some("root-id"), Some(""));
        let dst = folder("dst-id", "dst", None, Some(""));

        let mut preparer = CopyPreparationManager::new(&metadata, None, None, "P", "gr-P");
        traverser::traverse(&mut preparer, &src, &dst).unwrap();
        (
            preparer.read_lock_paths,
            preparer.register_file_nodes.len(),
            preparer.source_folder_nodes.len(),
        )
    })
    .await
    .unwrap();

    let (lock_paths, registered_count, folder_count) = result;

    let expected: HashSet<PathBuf> = [
        PathBuf::from("gr-P/src/a.txt"),
        PathBuf::from("gr-P/src/sub"),
        PathBuf::from("gr-P/src/sub/b.txt"),
    ]
    .into_iter()
    .collect();

    assert_eq!(lock_paths.into_iter().collect::<HashSet<_>>(), expected);
    assert_eq!(registered_count, 2);
    assert_eq!(folder_count, 1);
}

#[tokio::test]
async fn approved_entities_narrows_the_plan_to_the_approved_subset() {
    let server = MockServer::start().await;
    mount_tree_endpoints(&server).await;

    let base_url = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let src = folder("src-id", "src", Some("root-id"), Some(""));
        let dst = folder("dst-id", "dst", None, Some(""));

        let approved: HashSet<String> = ["b-id".to_string()].into_iter().collect();
        let mut preparer = CopyPreparationManager::new(&metadata, Some(approved), None, "P", "gr-P");
        traverser::traverse(&mut preparer, &src, &dst).unwrap();
        (preparer.read_lock_paths, preparer.register_file_nodes.len())
    })
    .await
    .unwrap();

    let (lock_paths, registered_count) = result;

    // Only b.txt is approved; a.txt is dropped from the plan, but the
    // "sub" folder itself is still created since folders aren't filtered by
    // the approved-entities set.
    assert_eq!(registered_count, 1);
    assert!(lock_paths.contains(&PathBuf::from("gr-P/src/sub/b.txt")));
    assert!(!lock_paths.contains(&PathBuf::from("gr-P/src/a.txt")));
}
