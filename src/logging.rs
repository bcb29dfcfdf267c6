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

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global `tracing` subscriber. Format (`json` or `compact`) is
/// taken from config, replacing the original's `logger.audit(...)` calls
/// with structured `tracing::info!`/`tracing::error!` spans that carry the
/// same fields (`project_code`, `operator`, `node_ids`, `source_id`,
/// `destination_id`).
pub fn init(config: &Config) {
    if config.logging_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(default_filter())
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(default_filter())
            .compact()
            .init();
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
