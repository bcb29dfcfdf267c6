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

use thiserror::Error;

/// Domain errors the engine itself can detect and name, as opposed to
/// generic transport/serialization failures which bubble up as
/// `anyhow::Error` wrapping the underlying cause.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("destination \"{0}\" is already in the trash bin")]
    DestinationArchived(String),

    #[error("resource lock request for {0:?} was rejected")]
    LockContention(Vec<String>),

    #[error("node \"{0}\" was not found")]
    NodeNotFound(String),

    #[error("registration for \"{0}\" collided and could not be resolved")]
    RegistrationCollision(String),

    #[error("service \"{service}\" returned unexpected status {status} for {action}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
        action: String,
    },

    #[error("include-ids {0:?} are not a subset of the source tree; nothing will be copied")]
    IncludeSetMismatch(Vec<String>),
}
