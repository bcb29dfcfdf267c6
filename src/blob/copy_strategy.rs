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

use anyhow::{Context, Result};
use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::blob::BlobClient;
use crate::utils::size::{LARGE_OBJECT_THRESHOLD, MULTIPART_CHUNK_SIZE};

/// Decides between a single server-side copy and a download + multipart
/// upload, mirroring `MetadataServiceClient._copy_file_node`: objects under
/// the 5 GB threshold are copied directly, larger ones are staged through
/// `temp_dir` and re-uploaded in 5 MiB parts.
///
/// `temp_file_path` is removed after the run regardless of outcome, matching
/// the original's `finally: shutil.rmtree(temp_path)`.
pub async fn copy_object(
    blob: &dyn BlobClient,
    temp_file_path: &Path,
    size: u64,
    dest_bucket: &str,
    dest_key: &str,
    src_bucket: &str,
    src_key: &str,
) -> Result<String> {
    if size < LARGE_OBJECT_THRESHOLD {
        info!(size, "object below large-object threshold, using server-side copy");
        let outcome = blob.copy_object(dest_bucket, dest_key, src_bucket, src_key).await?;
        return Ok(outcome.version_id);
    }

    info!(size, "object above large-object threshold, staging through multipart upload");
    let result = copy_via_multipart(blob, temp_file_path, dest_bucket, dest_key, src_bucket, src_key).await;

    if temp_file_path.exists() {
        let _ = tokio::fs::remove_file(temp_file_path).await;
        if let Some(parent) = temp_file_path.parent() {
            let _ = tokio::fs::remove_dir(parent).await;
        }
    }

    result
}

async fn copy_via_multipart(
    blob: &dyn BlobClient,
    temp_file_path: &Path,
    dest_bucket: &str,
    dest_key: &str,
    src_bucket: &str,
    src_key: &str,
) -> Result<String> {
    blob.download_object(src_bucket, src_key, temp_file_path).await?;

    let upload_id = blob.prepare_multipart(dest_bucket, dest_key).await?;

    let mut file = tokio::fs::File::open(temp_file_path)
        .await
        .with_context(|| format!("reopening staged file {}", temp_file_path.display()))?;

    let mut parts = Vec::new();
    let mut part_number = 1i32;
    let chunk_size = MULTIPART_CHUNK_SIZE as usize;
    let mut buf = vec![0u8; chunk_size];

    loop {
        let mut filled = 0;
        while filled < chunk_size {
            let n = file.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            break;
        }

        let data = Bytes::copy_from_slice(&buf[..filled]);
        let part = blob
            .part_upload(dest_bucket, dest_key, &upload_id, part_number, data)
            .await?;
        parts.push(part);
        part_number += 1;

        if filled < chunk_size {
            break;
        }
    }

    let outcome = blob
        .combine_chunks(dest_bucket, dest_key, &upload_id, parts)
        .await?;
    Ok(outcome.version_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{CopyOutcome, PartHandle};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingBlobClient {
        copy_calls: Mutex<u32>,
        multipart_calls: Mutex<u32>,
    }

    #[async_trait]
    impl BlobClient for RecordingBlobClient {
        async fn copy_object(
            &self,
            _dest_bucket: &str,
            _dest_key: &str,
            _src_bucket: &str,
            _src_key: &str,
        ) -> Result<CopyOutcome> {
            *self.copy_calls.lock() += 1;
            Ok(CopyOutcome::default())
        }

        async fn download_object(&self, _bucket: &str, _key: &str, dest_path: &Path) -> Result<()> {
            if let Some(parent) = dest_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(dest_path, vec![0u8; 10]).await?;
            Ok(())
        }

        async fn upload_object(&self, _bucket: &str, _key: &str, _local_path: &Path) -> Result<CopyOutcome> {
            Ok(CopyOutcome::default())
        }

        async fn prepare_multipart(&self, _bucket: &str, _key: &str) -> Result<String> {
            *self.multipart_calls.lock() += 1;
            Ok("upload-id".to_string())
        }

        async fn part_upload(
            &self,
            _bucket: &str,
            _key: &str,
            _upload_id: &str,
            part_number: i32,
            _data: Bytes,
        ) -> Result<PartHandle> {
            Ok(PartHandle {
                part_number,
                e_tag: format!("etag-{part_number}"),
            })
        }

        async fn combine_chunks(
            &self,
            _bucket: &str,
            _key: &str,
            _upload_id: &str,
            _parts: Vec<PartHandle>,
        ) -> Result<CopyOutcome> {
            Ok(CopyOutcome {
                version_id: "v1".to_string(),
            })
        }

        async fn remove_object(&self, _bucket: &str, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_small_object_uses_server_side_copy() {
        let client = Arc::new(RecordingBlobClient::default());
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path().join("staged");

        copy_object(client.as_ref(), &staging, 1024, "core-proj", "a/b", "gr-proj", "a/b")
            .await
            .unwrap();

        assert_eq!(*client.copy_calls.lock(), 1);
        assert_eq!(*client.multipart_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_large_object_uses_multipart_and_cleans_up_staging() {
        let client = Arc::new(RecordingBlobClient::default());
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path().join("staging-dir").join("file.bin");

        let version = copy_object(
            client.as_ref(),
            &staging,
            LARGE_OBJECT_THRESHOLD + 1,
            "core-proj",
            "a/b",
            "gr-proj",
            "a/b",
        )
        .await
        .unwrap();

        assert_eq!(version, "v1");
        assert_eq!(*client.multipart_calls.lock(), 1);
        assert!(!staging.exists());
    }
}
