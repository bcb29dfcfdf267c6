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

//! Top-level orchestrations, one per subcommand: build the service clients,
//! run the two-phase prepare/lock/commit/release protocol, and report the
//! outcome via job status and notifications.

pub mod copy;
pub mod delete;
pub mod share;

use std::collections::HashSet;

use crate::models::node::Node;

pub(crate) fn parse_ids(raw: &str) -> HashSet<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// `"batch"` for more than one target, else the sole target's own type —
/// mirrors the task-stream payload's `target_type` field.
pub(crate) fn resolve_target_type(include_nodes: &std::collections::HashMap<String, Node>) -> String {
    if include_nodes.len() > 1 {
        return "batch".to_string();
    }
    include_nodes
        .values()
        .next()
        .map(|n| format!("{:?}", n.entity_type).to_lowercase())
        .unwrap_or_else(|| "batch".to_string())
}
