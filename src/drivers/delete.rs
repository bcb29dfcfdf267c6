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

use crate::activity_producer::ActivityProducer;
use crate::blob::s3::S3BlobClient;
use crate::cli::DeleteArgs;
use crate::clients::dataops::DataopsServiceClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::clients::notification::NotificationServiceClient;
use crate::config::Config;
use crate::drivers::{parse_ids, resolve_target_type};
use crate::error::PipelineError;
use crate::managers::{DeleteManager, DeletePreparationManager};
use crate::models::enums::{JobStatus, PipelineAction, PipelineStatus, ResourceLockOperation};
use crate::models::job::JobContext;
use crate::models::notification::NotificationType;
use crate::redis_cache::DedupCache;
use crate::traverser;
use crate::ui;

pub fn run(args: &DeleteArgs) -> Result<()> {
    let config = Config::load()?;
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let metadata = MetadataServiceClient::new(&config.metadata_service, &config.s3_url(), &config.temp_dir, &args.access_token);
    let dataops = DataopsServiceClient::new(&config.dataops_service);
    let blob = rt.block_on(S3BlobClient::new(&config))?;
    let activity = ActivityProducer::new(&config.kafka_url)?;
    let dedup_cache = DedupCache::new(&config.redis_url())?;

    let include_ids = parse_ids(&args.include_ids);

    let source = metadata.get_item_by_id(&args.source_id)?;
    let include_nodes = metadata.get_items_by_ids(&include_ids.iter().cloned().collect::<Vec<_>>())?;

    ui::log_start("delete", &source.display_path().to_string_lossy());

    let job = JobContext {
        session_id: args.session_id.clone(),
        job_id: args.job_id.clone(),
        container_code: args.project_code.clone(),
        action_type: "delete".to_string(),
        operator: args.operator.clone(),
    };
    let target_names: Vec<String> = include_nodes.values().map(|n| n.name.clone()).collect();
    let target_type = resolve_target_type(&include_nodes);

    let mut notification = NotificationServiceClient::new(
        &config.notification_service,
        include_nodes,
        source.clone(),
        None,
        &args.project_code,
        PipelineAction::Delete,
        PipelineStatus::Success,
        &args.operator,
        NotificationType::Pipeline,
    );

    let source_bucket = format!("gr-{}", args.project_code);

    let result: Result<()> = (|| {
        let mut preparer = DeletePreparationManager::new(&metadata, Some(include_ids.clone()), &source_bucket);
        traverser::traverse(&mut preparer, &source, &source)?;

        if preparer.write_lock_paths.is_empty() {
            bail!(PipelineError::IncludeSetMismatch(include_ids.iter().cloned().collect()));
        }

        dataops.lock_resources(&preparer.write_lock_paths, ResourceLockOperation::Write)?;

        let delete_manager =
            DeleteManager::new(&metadata, &blob, &activity, &dedup_cache, &args.operator, include_ids.clone());
        let archive_result = delete_manager.archive_nodes(&rt);

        let unlock_result = dataops.unlock_resources(&preparer.write_lock_paths, ResourceLockOperation::Write);
        archive_result?;
        unlock_result?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            dataops.update_job(&job.task_stream_update(target_names, target_type, JobStatus::Succeed))?;
            notification.send_notifications()?;
            ui::log_finished("delete");
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
