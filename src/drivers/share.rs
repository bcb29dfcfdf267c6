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
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use crate::blob::BlobClient;
use crate::blob::s3::S3BlobClient;
use crate::cli::ShareArgs;
use crate::clients::dataops::DataopsServiceClient;
use crate::clients::dataset::DatasetServiceClient;
use crate::clients::metadata::MetadataServiceClient;
use crate::config::Config;
use crate::managers::ShareDatasetManager;
use crate::managers::share::fs_node;
use crate::models::enums::{JobStatus, ZoneType};
use crate::models::job::JobContext;
use crate::models::node::Node;
use crate::traverser;
use crate::ui;

pub fn run(args: &ShareArgs) -> Result<()> {
    let config = Config::load()?;
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let metadata = MetadataServiceClient::new(&config.metadata_service, &config.s3_url(), &config.temp_dir, &args.access_token);
    let dataset = DatasetServiceClient::new(&config.dataset_service);
    let dataops = DataopsServiceClient::new(&config.dataops_service);
    let blob = rt.block_on(S3BlobClient::new(&config))?;

    ui::log_start("share-dataset-version", &format!("{} -> {}", args.version_id, args.destination_project_code));

    let job = JobContext {
        session_id: args.session_id.clone(),
        job_id: args.job_id.clone(),
        container_code: args.destination_project_code.clone(),
        action_type: "data_import".to_string(),
        operator: args.operator.clone(),
    };

    let mut destination_folder_name = String::new();

    let result: Result<()> = (|| {
        let version = dataset.get_dataset_version(args.version_id)?;
        let destination_folder =
            metadata.get_name_folder(&args.operator, &args.destination_project_code, ZoneType::GREENROOM)?;

        destination_folder_name = dataset_version_folder_name(&version)?;

        let new_folder = Node {
            name: destination_folder_name.clone(),
            owner: Some(args.operator.clone()),
            ..fs_node_placeholder()
        };
        let destination_folder_node = metadata.register_folder(
            &args.destination_project_code,
            &new_folder,
            &destination_folder,
            ZoneType::GREENROOM,
        )?;

        let extract_dir = Path::new(&config.temp_dir).join(&destination_folder_name);
        let archive_path = Path::new(&config.temp_dir).join(format!("{destination_folder_name}.zip"));

        let extraction: Result<()> = (|| {
            download_and_extract(&rt, &blob, &version, &archive_path, &extract_dir)?;

            let mut manager = ShareDatasetManager::new(
                &metadata,
                &blob,
                &rt,
                &args.destination_project_code,
                ZoneType::GREENROOM,
                &args.operator,
            );
            let source_root = fs_node(&extract_dir)?;
            traverser::traverse(&mut manager, &source_root, &destination_folder_node)?;
            Ok(())
        })();

        let _ = std::fs::remove_file(&archive_path);
        let _ = std::fs::remove_dir_all(&extract_dir);
        extraction
    })();

    let target_names = vec![destination_folder_name];

    match result {
        Ok(()) => {
            dataops.update_job(&job.task_stream_update(target_names, "file".to_string(), JobStatus::Succeed))?;
            ui::log_finished("share-dataset-version");
            Ok(())
        }
        Err(err) => {
            ui::log_error(&err.to_string());
            if let Err(report_err) =
                dataops.update_job(&job.task_stream_update(target_names.clone(), "file".to_string(), JobStatus::Failed))
            {
                ui::log_warning(&format!("failed to report failed job status: {report_err}"));
            }
            std::process::exit(1);
        }
    }
}

/// `<dataset_code>-v<version>-<YYYY-MM-DD>-<epoch>`, matching the original
/// naming convention for an imported dataset version's destination folder.
fn dataset_version_folder_name(version: &Value) -> Result<String> {
    let dataset_code = version
        .get("dataset_code")
        .and_then(Value::as_str)
        .context("dataset version record has no dataset_code")?;
    let version_number = version.get("version").context("dataset version record has no version")?;

    let today = chrono::Utc::now().format("%Y-%m-%d");
    let epoch = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    Ok(format!("{dataset_code}-v{version_number}-{today}-{epoch}"))
}

/// A bare `Node` used only as a struct-update base when building the
/// synthetic destination-folder record passed to `register_folder`.
fn fs_node_placeholder() -> Node {
    Node {
        id: String::new(),
        name: String::new(),
        entity_type: crate::models::enums::ResourceType::Folder,
        status: crate::models::enums::ItemStatus::Active,
        zone: ZoneType::GREENROOM,
        parent: None,
        parent_path: None,
        size: 0,
        container_code: None,
        container_type: None,
        owner: None,
        restore_path: None,
        storage: None,
        extended: json!({}),
    }
}

/// Downloads the dataset version's backing archive and unpacks it into
/// `extract_dir`, leaving `archive_path` for the caller to remove.
fn download_and_extract(
    rt: &tokio::runtime::Runtime,
    blob: &dyn BlobClient,
    version: &Value,
    archive_path: &Path,
    extract_dir: &Path,
) -> Result<()> {
    let location = version
        .get("location")
        .and_then(Value::as_str)
        .context("dataset version record has no location")?;
    let (bucket, object_path) = split_minio_path(location)?;

    rt.block_on(blob.download_object(&bucket, &object_path, archive_path))?;

    std::fs::create_dir_all(extract_dir)?;
    let file = std::fs::File::open(archive_path).context("opening downloaded dataset version archive")?;
    let mut archive = zip::ZipArchive::new(file).context("reading dataset version archive")?;
    archive.extract(extract_dir).context("extracting dataset version archive")?;

    Ok(())
}

fn split_minio_path(location_uri: &str) -> Result<(String, String)> {
    let after_scheme = location_uri
        .rsplit_once("//")
        .map(|(_, rest)| rest)
        .ok_or_else(|| anyhow!("malformed minio location \"{location_uri}\""))?;

    let mut parts = after_scheme.splitn(3, '/');
    let _host = parts.next();
    let bucket = parts
        .next()
        .ok_or_else(|| anyhow!("malformed minio location \"{location_uri}\""))?;
    let object_path = parts.next().unwrap_or_default();

    Ok((bucket.to_string(), object_path.to_string()))
}

