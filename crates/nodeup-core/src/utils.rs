//! Shared path helpers for nodeup crates

use std::path::{Path, PathBuf};

/// Root manifest file name, also the marker of a project root
pub const ROOT_MANIFEST: &str = "composer.json";

/// Express `end` relative to `start`
///
/// Both paths are treated as plain strings: backslashes are normalized to
/// forward slashes and nothing touches the filesystem. The result ends with
/// a `/`, or is `./` when both paths are the same.
pub fn make_path_relative(end: &str, start: &str) -> String {
    let end = end.replace('\\', "/");
    let start = start.replace('\\', "/");

    let end_segments: Vec<&str> = end.split('/').filter(|s| !s.is_empty()).collect();
    let start_segments: Vec<&str> = start.split('/').filter(|s| !s.is_empty()).collect();

    let common = end_segments
        .iter()
        .zip(&start_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = "../".repeat(start_segments.len() - common);

    let remainder = &end_segments[common..];
    if !remainder.is_empty() {
        relative.push_str(&remainder.join("/"));
        relative.push('/');
    }

    if relative.is_empty() {
        "./".to_string()
    } else {
        relative
    }
}

/// Find the closest ancestor of `start` (inclusive) holding `file_name`
///
/// Returns the directory, not the file.
pub fn closest_file_path(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file_name).is_file())
        .map(Path::to_path_buf)
}
