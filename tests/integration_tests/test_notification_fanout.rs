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

use greencore::clients::notification::NotificationServiceClient;
use greencore::models::enums::{InvolvementType, PipelineAction, PipelineStatus};
use greencore::models::notification::NotificationType;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::folder;

fn make_client(
    endpoint: &str,
    source_folder: greencore::models::node::Node,
    destination_folder: Option<greencore::models::node::Node>,
    operator: &str,
) -> NotificationServiceClient {
    NotificationServiceClient::new(
        endpoint,
        HashMap::new(),
        source_folder,
        destination_folder,
        "P",
        PipelineAction::Copy,
        PipelineStatus::Success,
        operator,
        NotificationType::Pipeline,
    )
}

#[test]
fn initiator_owner_and_receiver_are_distinct_when_all_three_differ() {
    let source_folder = folder("src-id", "raw", None, Some("alice"));
    let destination_folder = folder("dst-id", "processed", None, Some("bob"));

    let client = make_client("http://unused", source_folder, Some(destination_folder), "carol");
    let involvers = client.get_priority();

    assert_eq!(
        involvers,
        vec![
            (InvolvementType::Initiator, "carol".to_string()),
            (InvolvementType::Owner, "alice".to_string()),
            (InvolvementType::Receiver, "bob".to_string()),
        ]
    );
}

#[test]
fn owner_is_dropped_when_they_are_also_the_initiator() {
    let source_folder = folder("src-id", "raw", None, Some("carol"));
    let destination_folder = folder("dst-id", "processed", None, Some("bob"));

    let client = make_client("http://unused", source_folder, Some(destination_folder), "carol");
    let involvers = client.get_priority();

    assert_eq!(
        involvers,
        vec![
            (InvolvementType::Initiator, "carol".to_string()),
            (InvolvementType::Receiver, "bob".to_string()),
        ]
    );
}

#[test]
fn receiver_is_dropped_when_it_matches_the_owner() {
    let source_folder = folder("src-id", "raw", None, Some("alice"));
    let destination_folder = folder("dst-id", "processed", None, Some("alice"));

    let client = make_client("http://unused", source_folder, Some(destination_folder), "carol");
    let involvers = client.get_priority();

    assert_eq!(
        involvers,
        vec![
            (InvolvementType::Initiator, "carol".to_string()),
            (InvolvementType::Owner, "alice".to_string()),
        ]
    );
}

#[test]
fn no_destination_folder_yields_only_initiator_and_owner() {
    let source_folder = folder("src-id", "raw", None, Some("alice"));

    let client = make_client("http://unused", source_folder, None, "carol");
    let involvers = client.get_priority();

    assert_eq!(
        involvers,
        vec![
            (InvolvementType::Initiator, "carol".to_string()),
            (InvolvementType::Owner, "alice".to_string()),
        ]
    );
}

#[tokio::test]
async fn send_notifications_posts_one_payload_entry_per_involved_party() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/all/notifications/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let source_folder = folder("src-id", "raw", None, Some("alice"));
        let destination_folder = folder("dst-id", "processed", None, Some("bob"));
        let client = make_client(&base_url, source_folder, Some(destination_folder), "carol");
        client.send_notifications()
    })
    .await
    .unwrap()
    .unwrap();
}
