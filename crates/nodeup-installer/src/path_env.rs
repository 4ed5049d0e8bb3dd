//! Search path registration

use std::path::Path;
use tracing::debug;

/// Separator between search path entries
pub fn path_separator(is_windows: bool) -> char {
    if is_windows {
        ';'
    } else {
        ':'
    }
}

/// Put `bin_dir` in front of `current`
pub fn prepend_search_path(bin_dir: &str, current: &str, is_windows: bool) -> String {
    if current.is_empty() {
        return bin_dir.to_string();
    }
    format!("{}{}{}", bin_dir, path_separator(is_windows), current)
}

/// Prepend the resolved bin directory to `current`
///
/// The directory is canonicalized when it exists so that the entry stays
/// valid whatever the working directory of later processes.
pub fn register_path(bin_dir: &Path, current: &str, is_windows: bool) -> String {
    let resolved = bin_dir
        .canonicalize()
        .unwrap_or_else(|_| bin_dir.to_path_buf());
    prepend_search_path(&resolved.to_string_lossy(), current, is_windows)
}

/// Write a search path value into this process's environment
///
/// Only children spawned afterwards by the same process see the change.
/// Meant for callers embedding the library; the `nodeup` binary prints the
/// value instead.
pub fn apply_search_path(value: &str) {
    debug!("Setting PATH={}", value);
    std::env::set_var("PATH", value);
}
