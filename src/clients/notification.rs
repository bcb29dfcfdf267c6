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

use anyhow::{Result, bail};
use tracing::error;

use crate::models::enums::{InvolvementType, PipelineAction, PipelineStatus};
use crate::models::node::Node;
use crate::models::notification::{
    Location, NotificationType, PipelineNotification, Target,
};

/// Client for the notification service: fans a single pipeline outcome out
/// into one notification per involved party (initiator, owning namespace,
/// receiving namespace).
pub struct NotificationServiceClient {
    endpoint: String,
    client: reqwest::blocking::Client,
    include_nodes: HashMap<String, Node>,
    source_folder: Node,
    destination_folder: Option<Node>,
    project_code: String,
    pipeline_action: PipelineAction,
    pipeline_status: PipelineStatus,
    operator: String,
    notification_type: NotificationType,
}

impl NotificationServiceClient {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        endpoint: &str,
        include_nodes: HashMap<String, Node>,
        source_folder: Node,
        destination_folder: Option<Node>,
        project_code: &str,
        pipeline_action: PipelineAction,
        pipeline_status: PipelineStatus,
        operator: &str,
        notification_type: NotificationType,
    ) -> Self {
        NotificationServiceClient {
            endpoint: format!("{endpoint}/v1/all/notifications/"),
            client: reqwest::blocking::Client::new(),
            include_nodes,
            source_folder,
            destination_folder,
            project_code: project_code.to_string(),
            pipeline_action,
            pipeline_status,
            operator: operator.to_string(),
            notification_type,
        }
    }

    pub fn set_status(&mut self, status: PipelineStatus) {
        self.pipeline_status = status;
    }

    pub fn set_location(&self, entity: &Node) -> Location {
        Location {
            id: entity.id.clone(),
            path: entity.display_path().to_string_lossy().to_string(),
            zone: entity.zone.0,
        }
    }

    pub fn set_targets(&self) -> Vec<Target> {
        self.include_nodes
            .values()
            .map(|node| Target {
                id: node.id.clone(),
                name: node.name.clone(),
                target_type: node.entity_type.into(),
            })
            .collect()
    }

    /// Derives which parties get a notification and under which role.
    /// The initiator always gets one; the source namespace's owner gets a
    /// distinct one unless they are the initiator; the destination
    /// namespace's owner gets a third unless they coincide with either of
    /// the above.
    pub fn get_priority(&self) -> Vec<(InvolvementType, String)> {
        let mut involvers = vec![(InvolvementType::Initiator, self.operator.clone())];

        let owner = self
            .source_folder
            .display_path()
            .iter()
            .next()
            .map(|s| s.to_string_lossy().to_string());

        let receiver = self
            .destination_folder
            .as_ref()
            .and_then(|node| node.display_path().iter().next().map(|s| s.to_string_lossy().to_string()));

        if let Some(owner) = owner.clone() {
            if owner != self.operator {
                involvers.push((InvolvementType::Owner, owner));
            }
        }

        if let Some(receiver) = receiver {
            if Some(&receiver) != owner.as_ref() && receiver != self.operator {
                involvers.push((InvolvementType::Receiver, receiver));
            }
        }

        involvers
    }

    pub fn send_notifications(&self) -> Result<()> {
        let source = self.set_location(&self.source_folder);
        let targets = self.set_targets();
        let involvers = self.get_priority();
        let destination = self.destination_folder.as_ref().map(|node| self.set_location(node));

        let payload: Vec<PipelineNotification> = involvers
            .into_iter()
            .map(|(involvement, username)| PipelineNotification {
                notification_type: self.notification_type,
                recipient_username: username,
                involved_as: involvement.into(),
                action: self.pipeline_action,
                status: self.pipeline_status,
                initiator_username: self.operator.clone(),
                project_code: self.project_code.clone(),
                source: source.clone(),
                destination: destination.clone(),
                targets: targets.clone(),
            })
            .collect();

        let response = self.client.post(&self.endpoint).json(&payload).send()?;

        if response.status() != 204 {
            error!(action = ?self.pipeline_action, "failed to create notification");
            bail!("unable to create notifications for {:?}", self.pipeline_action);
        }
        Ok(())
    }
}
