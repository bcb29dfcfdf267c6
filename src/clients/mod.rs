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

//! Synchronous HTTP clients for the five collaborating services, one per
//! module, each a thin literal interface matching its Python counterpart
//! under `operations/services/*/client.py` — not a reimplementation of the
//! service itself.

pub mod approval;
pub mod dataops;
pub mod dataset;
pub mod metadata;
pub mod notification;
pub mod project;
