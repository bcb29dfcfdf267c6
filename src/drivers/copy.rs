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
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use crate::activity_producer::ActivityProducer;
use crate::blob::BlobClient;
use crate::blob::s3::S3BlobClient;
use crate::cli::CopyArgs;
use crate::clients::approval::ApprovalServiceClient;
use crate::clients::dataops::DataopsServiceClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::clients::notification::NotificationServiceClient;
use crate::clients::project::ProjectServiceClient;
use crate::config::Config;
use crate::drivers::{parse_ids, resolve_target_type};
use crate::error::PipelineError;
use crate::managers::{CopyManager, CopyPreparationManager};
use crate::models::enums::{JobStatus, PipelineAction, PipelineStatus, ResourceLockOperation};
use crate::models::job::JobContext;
use crate::models::node::Node;
use crate::models::notification::NotificationType;
use crate::traverser;
use crate::ui;

/// `--request-info '{"<request_id>": ["<entity_id>", ...]}'` gates the copy
/// by the approval service: only the named entities are copied, and each is
/// reported back to the approval service once copied.
fn parse_request_info(raw: &str, endpoint: &str) -> Result<(HashSet<String>, ApprovalServiceClient)> {
    let parsed: std::collections::HashMap<String, Vec<String>> =
        serde_json::from_str(raw).context("parsing --request-info")?;
    let (request_id, approved) = parsed
        .into_iter()
        .next()
        .context("--request-info must name exactly one request id")?;
    Ok((approved.into_iter().collect(), ApprovalServiceClient::new(endpoint, &request_id)))
}

pub fn run(args: &CopyArgs) -> Result<()> {
    let config = Config::load()?;
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let metadata = MetadataServiceClient::new(&config.metadata_service, &config.s3_url(), &config.temp_dir, &args.access_token);
    let dataops = DataopsServiceClient::new(&config.dataops_service);
    let blob = rt.block_on(S3BlobClient::new(&config))?;
    let activity = ActivityProducer::new(&config.kafka_url)?;

    let include_ids = parse_ids(&args.include_ids);
    let (approved_entities, approval) = match &args.request_info {
        Some(raw) => {
            let (approved, client) = parse_request_info(raw, &config.approval_service)?;
            (Some(approved), Some(client))
        }
        None => (None, None),
    };

    let source = metadata.get_item_by_id(&args.source_id)?;
    let destination = metadata.get_item_by_id(&args.destination_id)?;
    let include_nodes = metadata.get_items_by_ids(&include_ids.iter().cloned().collect::<Vec<_>>())?;

    let project = ProjectServiceClient::new(&config.project_service).get_project_by_code(&args.project_code)?;
    let project_code = project.container_code.unwrap_or_else(|| args.project_code.clone());

    ui::log_start("copy", &format!("{} -> {}", source.display_path().display(), destination.display_path().display()));

    let job = JobContext {
        session_id: args.session_id.clone(),
        job_id: args.job_id.clone(),
        container_code: args.project_code.clone(),
        action_type: "copy".to_string(),
        operator: args.operator.clone(),
    };
    let target_names: Vec<String> = include_nodes.values().map(|n| n.name.clone()).collect();
    let target_type = resolve_target_type(&include_nodes);

    let mut notification = NotificationServiceClient::new(
        &config.notification_service,
        include_nodes,
        source.clone(),
        Some(destination.clone()),
        &args.project_code,
        PipelineAction::Copy,
        PipelineStatus::Success,
        &args.operator,
        NotificationType::Pipeline,
    );

    let result = execute(
        &rt,
        &config,
        &metadata,
        &dataops,
        approval.as_ref(),
        &activity,
        &blob,
        approved_entities,
        &include_ids,
        &source,
        &destination,
        &project_code,
        args,
    );

    match result {
        Ok(()) => {
            dataops.update_job(&job.task_stream_update(target_names, target_type, JobStatus::Succeed))?;
            notification.send_notifications()?;
            ui::log_finished("copy");
            Ok(())
        }
        Err(err) => {
            ui::log_error(&err.to_string());
            if let Err(report_err) =
                dataops.update_job(&job.task_stream_update(target_names.clone(), target_type.clone(), JobStatus::Failed))
            {
                ui::log_warning(&format!("failed to report failed job status: {report_err}"));
            }
            notification.set_status(PipelineStatus::Failure);
            if let Err(notify_err) = notification.send_notifications() {
                ui::log_warning(&format!("failed to send failure notification: {notify_err}"));
            }
            std::process::exit(1);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn execute(
    rt: &tokio::runtime::Runtime,
    config: &Config,
    metadata: &MetadataServiceClient,
    dataops: &DataopsServiceClient,
    approval: Option<&ApprovalServiceClient>,
    activity: &ActivityProducer,
    blob: &dyn BlobClient,
    approved_entities: Option<HashSet<String>>,
    include_ids: &HashSet<String>,
    source: &Node,
    destination: &Node,
    project_code: &str,
    args: &CopyArgs,
) -> Result<()> {
    if destination.is_archived() {
        bail!(PipelineError::DestinationArchived(destination.id.clone()));
    }

    let source_bucket = format!("gr-{project_code}");

    let mut preparer = CopyPreparationManager::new(
        metadata,
        approved_entities.clone(),
        Some(include_ids.clone()),
        project_code,
        &source_bucket,
    );
    traverser::traverse(&mut preparer, source, destination)?;

    if preparer.read_lock_paths.is_empty() {
        bail!(PipelineError::IncludeSetMismatch(include_ids.iter().cloned().collect()));
    }

    dataops.lock_resources(&preparer.read_lock_paths, ResourceLockOperation::Read)?;

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

    let mut registered = match metadata.register_nodes(&preparer.register_file_nodes, project_code, timestamp) {
        Ok(registered) => registered,
        Err(err) => {
            let _ = dataops.unlock_resources(&preparer.read_lock_paths, ResourceLockOperation::Read);
            return Err(err);
        }
    };

    let system_tags = if approval.is_some() {
        vec![config.copied_with_approval_tag.clone()]
    } else {
        Vec::new()
    };

    let copy_manager = CopyManager::new(
        metadata,
        dataops,
        approval,
        activity,
        approved_entities.map(|set| set.into_iter().collect()),
        system_tags,
        project_code,
        &args.operator,
        blob,
    );

    let commit_result = copy_manager
        .process_files(rt, &mut registered, &preparer.source_file_node)
        .and_then(|()| copy_manager.process_folders(&preparer.source_folder_nodes));

    let unlock_result = dataops.unlock_resources(&preparer.read_lock_paths, ResourceLockOperation::Read);

    if let Err(err) = commit_result {
        let _ = metadata.remove_registered_nodes(&registered);
        unlock_result?;
        return Err(err);
    }
    unlock_result?;

    Ok(())
}
