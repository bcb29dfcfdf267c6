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

use anyhow::{Context, Result};
use serde::Deserialize;

/// Process configuration, loaded once from the environment (prefixed
/// `GREENCORE_`) with sane local defaults, mirroring `operations/config.py`'s
/// `Settings`. Secret retrieval (the original's Vault integration) is out of
/// scope: operators set `GREENCORE_S3_ACCESS_KEY` / `GREENCORE_S3_SECRET_KEY`
/// / `GREENCORE_REDIS_PASSWORD` directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default = "Config::default_logging_format")]
    pub logging_format: String,

    #[serde(default)]
    pub s3_host: String,
    #[serde(default = "Config::default_s3_port")]
    pub s3_port: u16,
    #[serde(default)]
    pub s3_internal_https: bool,
    #[serde(default)]
    pub s3_access_key: String,
    #[serde(default)]
    pub s3_secret_key: String,

    #[serde(default = "Config::default_dataops_service")]
    pub dataops_service: String,
    #[serde(default = "Config::default_metadata_service")]
    pub metadata_service: String,
    #[serde(default = "Config::default_project_service")]
    pub project_service: String,
    #[serde(default = "Config::default_approval_service")]
    pub approval_service: String,
    #[serde(default = "Config::default_notification_service")]
    pub notification_service: String,
    #[serde(default = "Config::default_dataset_service")]
    pub dataset_service: String,

    #[serde(default = "Config::default_green_zone_label")]
    pub green_zone_label: String,
    #[serde(default = "Config::default_core_zone_label")]
    pub core_zone_label: String,

    #[serde(default = "Config::default_temp_dir")]
    pub temp_dir: String,
    #[serde(default = "Config::default_copied_with_approval_tag")]
    pub copied_with_approval_tag: String,

    #[serde(default = "Config::default_redis_user")]
    pub redis_user: String,
    #[serde(default)]
    pub redis_password: String,
    #[serde(default = "Config::default_redis_host")]
    pub redis_host: String,
    #[serde(default = "Config::default_redis_port")]
    pub redis_port: u16,

    #[serde(default)]
    pub kafka_url: String,
}

impl Config {
    fn default_logging_format() -> String {
        "json".to_string()
    }
    fn default_s3_port() -> u16 {
        9000
    }
    fn default_dataops_service() -> String {
        "http://127.0.0.1:5063".to_string()
    }
    fn default_metadata_service() -> String {
        "http://127.0.0.1:5066".to_string()
    }
    fn default_project_service() -> String {
        "http://127.0.0.1:5064".to_string()
    }
    fn default_approval_service() -> String {
        "http://127.0.0.1:8000".to_string()
    }
    fn default_notification_service() -> String {
        "http://127.0.0.1:5065".to_string()
    }
    fn default_dataset_service() -> String {
        "http://127.0.0.1:5067".to_string()
    }
    fn default_green_zone_label() -> String {
        "Greenroom".to_string()
    }
    fn default_core_zone_label() -> String {
        "Core".to_string()
    }
    fn default_temp_dir() -> String {
        "./greencore-tmp".to_string()
    }
    fn default_copied_with_approval_tag() -> String {
        "copied-to-core".to_string()
    }
    fn default_redis_user() -> String {
        "default".to_string()
    }
    fn default_redis_host() -> String {
        "127.0.0.1".to_string()
    }
    fn default_redis_port() -> u16 {
        6379
    }

    /// Loads configuration from environment variables prefixed `GREENCORE_`,
    /// e.g. `GREENCORE_S3_HOST`, `GREENCORE_KAFKA_URL`.
    pub fn load() -> Result<Config> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("GREENCORE").separator("_"))
            .build()
            .context("failed to assemble configuration sources")?
            .try_deserialize()
            .context("failed to load configuration")
    }

    pub fn s3_url(&self) -> String {
        format!("{}:{}", self.s3_host, self.s3_port)
    }

    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}@{}:{}",
            self.redis_user, self.redis_password, self.redis_host, self.redis_port
        )
    }
}
