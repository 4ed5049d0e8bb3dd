//! Seams between the bootstrap orchestrator and the outside world

use async_trait::async_trait;
use nodeup_core::{NodeVersion, Result};
use std::path::{Path, PathBuf};

use crate::probe::Probe;

/// Source of the versions published remotely
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// All advertised versions, in listing order
    async fn list(&self) -> Result<Vec<NodeVersion>>;
}

/// Detects, installs, and links a Node.js runtime
#[async_trait]
pub trait RuntimeInstaller: Send + Sync {
    /// Version of the `nodejs`/`node` found on the search path
    async fn global_version(&self) -> Option<NodeVersion>;

    /// Location of `command` on the search path
    fn global_path(&self, command: &str) -> Probe;

    /// Version reported by the `node` script in `bin_dir`
    async fn local_version(&self, bin_dir: &Path) -> Option<NodeVersion>;

    /// Download `version` and place it into `target_dir`
    async fn install(&self, version: &NodeVersion, target_dir: &Path) -> Result<PathBuf>;

    /// Write the wrapper scripts into `bin_dir`, returning the files written
    fn create_bin_scripts(
        &self,
        bin_dir: &Path,
        target_dir: &Path,
        is_local: bool,
    ) -> Result<Vec<PathBuf>>;

    /// New search path value with `bin_dir` in front of `current_path`
    fn register_path(&self, bin_dir: &Path, current_path: &str) -> String;
}
