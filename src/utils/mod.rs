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

#[allow(non_upper_case_globals)]
pub mod size {
    pub const KiB: u64 = 1024;
    pub const MiB: u64 = KiB * 1024;
    pub const GiB: u64 = MiB * 1024;

    /// Fixed multipart chunk size used by the object copy strategy.
    pub const MULTIPART_CHUNK_SIZE: u64 = 5 * MiB;

    /// Threshold above which a copy is performed via download+multipart
    /// upload instead of a single server-side copy call.
    pub const LARGE_OBJECT_THRESHOLD: u64 = 5_000_000_000;
}

#[allow(non_upper_case_globals)]
pub fn format_size(bytes: u64) -> String {
    use size::*;
    if bytes >= GiB {
        format!("{:.2} GiB", (bytes as f64) / (GiB as f64))
    } else if bytes >= MiB {
        format!("{:.2} MiB", (bytes as f64) / (MiB as f64))
    } else if bytes >= KiB {
        format!("{:.2} KiB", (bytes as f64) / (KiB as f64))
    } else if bytes != 1 {
        format!("{} bytes", bytes)
    } else {
        "1 byte".to_string()
    }
}

/// Splits a filename into (stem, combined extension), where the combined
/// extension is everything from the first dot onward (`name.tar.gz` ->
/// (`name`, `.tar.gz`)), matching the original service's suffixing rule.
pub fn split_combined_extension(filename: &str) -> (&str, &str) {
    match filename.find('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// Appends a `_<suffix>` tag to a filename, before its full combined
/// extension: `name.tar.gz` with suffix `1690000000` becomes
/// `name_1690000000.tar.gz`.
pub fn append_suffix_to_filepath(filename: &str, suffix: &str) -> String {
    let (stem, ext) = split_combined_extension(filename);
    format!("{stem}_{suffix}{ext}")
}
