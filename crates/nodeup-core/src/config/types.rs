//! Configuration types
//!
//! `PluginConfig` lives under `extra.mouf.nodejs` in the root manifest,
//! `HostConfig` under the root manifest's `config` key.

use serde::{Deserialize, Serialize};

/// Default Node.js distribution mirror
pub const DEFAULT_DIST_URL: &str = "https://nodejs.org/dist/";

/// Installer options declared by the root package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Accept a compatible global Node.js instead of installing locally
    pub use_global: bool,

    /// Prepend the bin directory to `PATH` after dispatch
    pub include_bin_in_path: bool,

    /// Always install locally, even when a global Node.js matches
    pub force_local: bool,

    /// Install directory, relative to the project root when not absolute
    pub target_dir: Option<String>,

    /// Base URL of the distribution index
    pub dist_url: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            use_global: false,
            include_bin_in_path: false,
            force_local: false,
            target_dir: None,
            dist_url: DEFAULT_DIST_URL.to_string(),
        }
    }
}

/// Directory layout of the host project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HostConfig {
    pub vendor_dir: String,
    pub bin_dir: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            vendor_dir: "vendor".to_string(),
            bin_dir: None,
        }
    }
}

impl HostConfig {
    /// Bin directory, defaulting to `<vendor-dir>/bin`
    ///
    /// The `{$vendor-dir}` placeholder is expanded the way Composer does.
    pub fn bin_dir(&self) -> String {
        match &self.bin_dir {
            Some(dir) => dir.replace("{$vendor-dir}", &self.vendor_dir),
            None => format!("{}/bin", self.vendor_dir.trim_end_matches('/')),
        }
    }
}
