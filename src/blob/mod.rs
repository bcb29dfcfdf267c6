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

pub mod copy_strategy;
pub mod s3;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Opaque handle to one uploaded part of a multipart upload, as returned by
/// `part_upload` and collected for `combine_chunks`.
#[derive(Debug, Clone)]
pub struct PartHandle {
    pub part_number: i32,
    pub e_tag: String,
}

/// Result of any operation that places an object at a destination key.
#[derive(Debug, Clone, Default)]
pub struct CopyOutcome {
    /// Empty when the backend does not have object versioning enabled.
    pub version_id: String,
}

/// Abstraction over the object store backing a project's data zones.
///
/// Generalizes the teacher's `StorageBackend` trait (local filesystem / SFTP
/// / dry-run backends for a single-tree backup) to an S3-style object store
/// addressed by `(bucket, key)` pairs, with the three-step large-object
/// protocol the original service uses: `prepare_multipart`, `part_upload`,
/// `combine_chunks`.
#[async_trait]
pub trait BlobClient: Send + Sync {
    /// Server-side copy, valid only for objects under the 5 GB threshold.
    async fn copy_object(
        &self,
        dest_bucket: &str,
        dest_key: &str,
        src_bucket: &str,
        src_key: &str,
    ) -> Result<CopyOutcome>;

    /// Downloads an object to a local path, creating parent directories as
    /// needed.
    async fn download_object(&self, bucket: &str, key: &str, dest_path: &Path) -> Result<()>;

    /// Single-shot upload of a local file, used for small objects.
    async fn upload_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<CopyOutcome>;

    /// Starts a multipart upload and returns its upload id.
    async fn prepare_multipart(&self, bucket: &str, key: &str) -> Result<String>;

    /// Uploads a single part. `part_number` is 1-indexed, matching the
    /// original service's `part_number + 1` convention.
    async fn part_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Bytes,
    ) -> Result<PartHandle>;

    /// Completes a multipart upload from its collected part handles.
    async fn combine_chunks(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<PartHandle>,
    ) -> Result<CopyOutcome>;

    /// Removes an object. Kept as an explicit no-op by callers that mirror
    /// the original service's commented-out delete-on-archive call; the
    /// trait method itself still performs a real delete so other call sites
    /// (e.g. tests) can exercise it.
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()>;
}
