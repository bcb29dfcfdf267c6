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

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::blob::{BlobClient, CopyOutcome, PartHandle};
use crate::config::Config;

/// `BlobClient` backed by an S3-compatible object store (the original
/// service targets MinIO), built from the crate's `Config`.
pub struct S3BlobClient {
    client: Client,
}

impl S3BlobClient {
    pub async fn new(config: &Config) -> Result<Self> {
        let scheme = if config.s3_internal_https { "https" } else { "http" };
        let endpoint_url = format!("{scheme}://{}", config.s3_url());

        let credentials = Credentials::new(
            config.s3_access_key.clone(),
            config.s3_secret_key.clone(),
            None,
            None,
            "greencore-static",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(endpoint_url)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(S3BlobClient {
            client: Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl BlobClient for S3BlobClient {
    async fn copy_object(
        &self,
        dest_bucket: &str,
        dest_key: &str,
        src_bucket: &str,
        src_key: &str,
    ) -> Result<CopyOutcome> {
        info!(src_bucket, src_key, dest_bucket, dest_key, "server-side copy");
        let copy_source = format!("{src_bucket}/{src_key}");
        let output = self
            .client
            .copy_object()
            .bucket(dest_bucket)
            .key(dest_key)
            .copy_source(copy_source)
            .send()
            .await
            .with_context(|| format!("copy_object {src_bucket}/{src_key} -> {dest_bucket}/{dest_key}"))?;

        Ok(CopyOutcome {
            version_id: output.version_id().unwrap_or_default().to_string(),
        })
    }

    async fn download_object(&self, bucket: &str, key: &str, dest_path: &Path) -> Result<()> {
        if let Some(parent) = dest_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("get_object {bucket}/{key}"))?;

        let mut file = tokio::fs::File::create(dest_path).await?;
        while let Some(chunk) = output.body.try_next().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }

    async fn upload_object(&self, bucket: &str, key: &str, local_path: &Path) -> Result<CopyOutcome> {
        let body = ByteStream::from_path(local_path)
            .await
            .with_context(|| format!("reading {}", local_path.display()))?;

        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .with_context(|| format!("put_object {bucket}/{key}"))?;

        Ok(CopyOutcome {
            version_id: output.version_id().unwrap_or_default().to_string(),
        })
    }

    async fn prepare_multipart(&self, bucket: &str, key: &str) -> Result<String> {
        let output = self
            .client
            .create_multipart_upload()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("create_multipart_upload {bucket}/{key}"))?;

        output
            .upload_id()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("create_multipart_upload {bucket}/{key} returned no upload id"))
    }

    async fn part_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Bytes,
    ) -> Result<PartHandle> {
        let output = self
            .client
            .upload_part()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(data))
            .send()
            .await
            .with_context(|| format!("upload_part {bucket}/{key} #{part_number}"))?;

        Ok(PartHandle {
            part_number,
            e_tag: output.e_tag().unwrap_or_default().to_string(),
        })
    }

    async fn combine_chunks(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<PartHandle>,
    ) -> Result<CopyOutcome> {
        let completed_parts: Vec<CompletedPart> = parts
            .into_iter()
            .map(|p| {
                CompletedPart::builder()
                    .part_number(p.part_number)
                    .e_tag(p.e_tag)
                    .build()
            })
            .collect();

        let output = self
            .client
            .complete_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed_parts))
                    .build(),
            )
            .send()
            .await
            .with_context(|| format!("complete_multipart_upload {bucket}/{key}"))?;

        Ok(CopyOutcome {
            version_id: output.version_id().unwrap_or_default().to_string(),
        })
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("delete_object {bucket}/{key}"))?;
        Ok(())
    }
}
