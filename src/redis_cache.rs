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
use redis::AsyncCommands;

use crate::models::enums::ZoneType;

/// Dedup cache used by the delete path to avoid double-archiving a node two
/// concurrent jobs both picked up. Takes an explicit connection rather than
/// reaching for a process-wide singleton the way `RedisClient` did.
pub struct DedupCache {
    client: redis::Client,
}

impl DedupCache {
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("opening redis client")?;
        Ok(DedupCache { client })
    }

    /// Dedup key for a node: `<core|greenroom>/<container_code>/<parent_path>/<name>`.
    pub fn key_for(container_code: &str, parent_path: &str, name: &str, zone: ZoneType) -> String {
        let bucket_prefix = if zone == ZoneType::CORE { "core" } else { "greenroom" };
        format!("{bucket_prefix}/{container_code}/{parent_path}/{name}")
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_core_zone() {
        let key = DedupCache::key_for("proj1", "user/raw", "data.csv", ZoneType::CORE);
        assert_eq!(key, "core/proj1/user/raw/data.csv");
    }

    #[test]
    fn test_key_for_greenroom_zone() {
        let key = DedupCache::key_for("proj1", "user/raw", "data.csv", ZoneType::GREENROOM);
        assert_eq!(key, "greenroom/proj1/user/raw/data.csv");
    }
}
