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
use greencore::managers::DeletePreparationManager;
use greencore::traverser;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{file, folder};

#[tokio::test]
async fn write_locks_cover_every_descendant_of_the_targeted_folder() {
    let server = MockServer::start().await;

    let target = folder("target-id", "target", Some("root-id"), Some(""));
    let nested = folder("nested-id", "nested", Some("target-id"), Some("target"));
    let a_txt = file("a-id", "a.txt", Some("target-id"), Some("target"), 1);
    let b_txt = file("b-id", "b.txt", Some("nested-id"), Some("target/nested"), 2);

    Mock::given(method("GET"))
        .and(path("/v1/item/target-id/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": target})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/items/search/"))
        .and(query_param("parent_path", "target"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [a_txt, nested.clone()]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/item/nested-id/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": nested})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/items/search/"))
        .and(query_param("parent_path", "target/nested"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [b_txt]})))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let lock_paths = tokio::task::spawn_blocking(move || {
        let metadata = MetadataServiceClient::new(&base_url, "minio:9000", "/tmp", "token");
        let target = folder("target-id", "target", Some("root-id"), Some(""));

        let mut preparer = DeletePreparationManager::new(&metadata, None, "gr-P");
        traverser::traverse(&mut preparer, &target, &target).unwrap();
        preparer.write_lock_paths
    })
    .await
    .unwrap();

    let expected: HashSet<PathBuf> = [
        PathBuf::from("gr-P/target/a.txt"),
        PathBuf::from("gr-P/target/nested"),
        PathBuf::from("gr-P/target/nested/b.txt"),
    ]
    .into_iter()
    .collect();

    assert_eq!(lock_paths.into_iter().collect::<HashSet<_>>(), expected);
}
