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

//! Per-operation visitor strategies driven by [`crate::traverser`].

pub mod copy;
pub mod copy_preparation;
pub mod delete;
pub mod delete_preparation;
pub mod share;

pub use copy::CopyManager;
pub use copy_preparation::CopyPreparationManager;
pub use delete::DeleteManager;
pub use delete_preparation::DeletePreparationManager;
pub use share::ShareDatasetManager;
