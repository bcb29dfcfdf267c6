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

//! Terminal summaries, kept distinct from the structured `tracing` log
//! stream the same way the teacher's `ui::cli` module sits alongside the
//! rest of the crate.

use colored::Colorize;

/// Prints a warning log (warning: ...)
pub fn log_warning(str: &str) {
    eprintln!("{}: {}", "Warning".bold().yellow(), str);
}

/// Prints an error log (error: ...)
pub fn log_error(str: &str) {
    eprintln!("{}: {}", "Error".bold().red(), str);
}

/// Prints the start-of-run banner.
pub fn log_start(action: &str, detail: &str) {
    println!("{} {}", "Starting".bold().cyan(), format!("{action}: {detail}"));
}

/// Prints the end-of-run banner.
pub fn log_finished(action: &str) {
    println!("{} {}", format!("{action} finished").bold().green(), "successfully");
}
