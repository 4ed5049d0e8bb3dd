//! Global and local install probes
//!
//! Every probe degrades to "absent": a missing binary, a failing process, or
//! unparseable output all mean there is nothing usable installed.

use nodeup_core::NodeVersion;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Names the Node.js runtime is installed under, in lookup order
const NODE_COMMANDS: &[&str] = &["nodejs", "node"];

/// Result of locating a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "lowercase")]
pub enum Probe {
    Found(PathBuf),
    NotFound,
}

impl Probe {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Probe::Found(path) => Some(path),
            Probe::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }
}

/// Runs probes as child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessProbe {
    /// Search path override; the process `PATH` when unset
    search_path: Option<OsString>,
    is_windows: bool,
}

impl ProcessProbe {
    /// Probe the process search path
    pub fn new() -> Self {
        Self {
            search_path: None,
            is_windows: cfg!(windows),
        }
    }

    /// Probe an explicit search path instead of the process `PATH`
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            is_windows: cfg!(windows),
        }
    }

    /// Locate `command` on the search path
    pub fn locate(&self, command: &str) -> Probe {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(command, Some(paths), cwd)
            }
            None => which::which(command),
        };

        match found {
            Ok(path) => Probe::Found(path),
            Err(e) => {
                debug!("{} not found on search path: {}", command, e);
                Probe::NotFound
            }
        }
    }

    /// Locate the global Node.js runtime, trying `nodejs` before `node`
    pub fn node_global_path(&self) -> Probe {
        NODE_COMMANDS
            .iter()
            .map(|command| self.locate(command))
            .find(Probe::is_found)
            .unwrap_or(Probe::NotFound)
    }

    /// Version of the global runtime; the first command that answers wins
    pub async fn global_version(&self) -> Option<NodeVersion> {
        for command in NODE_COMMANDS {
            let Probe::Found(path) = self.locate(command) else {
                continue;
            };

            let mut cmd = Command::new(&path);
            cmd.arg("-v");
            if let Some(version) = run_version_command(cmd).await {
                debug!("Global Node.js {} at {}", version, path.display());
                return Some(version);
            }
        }

        None
    }

    /// Version reported by `<project_root>/<bin_dir>/node -v`
    ///
    /// The child runs inside `project_root`, so relative bin directories and
    /// the relative paths baked into local scripts resolve the same way they
    /// do for the user.
    pub async fn local_version(&self, project_root: &Path, bin_dir: &Path) -> Option<NodeVersion> {
        let bin_dir = if bin_dir.is_absolute() {
            bin_dir.to_path_buf()
        } else {
            project_root.join(bin_dir)
        };

        let mut cmd = if self.is_windows {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(bin_dir.join("node.bat"));
            cmd
        } else {
            Command::new(bin_dir.join("node"))
        };
        cmd.arg("-v").current_dir(project_root);

        let version = run_version_command(cmd).await;
        debug!("Local Node.js in {}: {:?}", bin_dir.display(), version);
        version
    }
}

/// Run a `-v` style command and parse the last line of its output
async fn run_version_command(mut cmd: Command) -> Option<NodeVersion> {
    let output = cmd.output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last_line = stdout.lines().rev().find(|line| !line.trim().is_empty())?;
    NodeVersion::parse(last_line).ok()
}
