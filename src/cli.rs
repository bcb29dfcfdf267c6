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

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(version = env!("CARGO_PKG_VERSION"), about = "Pipeline worker for copy/delete/share operations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[clap(about = "Copy items from a source id into a destination id")]
    Copy(CopyArgs),

    #[clap(about = "Move items from a source id into the trash bin")]
    Delete(DeleteArgs),

    #[clap(name = "share-dataset-version", about = "Copy a dataset version into a project")]
    ShareDatasetVersion(ShareArgs),
}

#[derive(Parser, Debug)]
pub struct CopyArgs {
    #[clap(long)]
    pub source_id: String,
    #[clap(long)]
    pub destination_id: String,
    /// Comma-separated list of top-level node ids to include.
    #[clap(long)]
    pub include_ids: String,
    #[clap(long)]
    pub job_id: String,
    #[clap(long)]
    pub session_id: String,
    #[clap(long)]
    pub project_code: String,
    #[clap(long)]
    pub operator: String,
    /// `{request_id: [approved_entity_id, ...]}`; gates the copy by the
    /// approval service when present.
    #[clap(long)]
    pub request_info: Option<String>,
    #[clap(long)]
    pub access_token: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    #[clap(long)]
    pub source_id: String,
    #[clap(long)]
    pub include_ids: String,
    #[clap(long)]
    pub job_id: String,
    #[clap(long)]
    pub session_id: String,
    #[clap(long)]
    pub project_code: String,
    #[clap(long)]
    pub operator: String,
    #[clap(long)]
    pub access_token: String,
}

#[derive(Parser, Debug)]
pub struct ShareArgs {
    #[clap(long)]
    pub version_id: Uuid,
    #[clap(long)]
    pub destination_project_code: String,
    #[clap(long)]
    pub job_id: String,
    #[clap(long)]
    pub session_id: String,
    #[clap(long)]
    pub operator: String,
    #[clap(long)]
    pub access_token: String,
}
