//! Filesystem layout of a managed install

use nodeup_core::{Error, HostConfig, PluginConfig, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Package name used for the install directory when the owner is unknown
pub const DEFAULT_OWNER: &str = "mouf/nodejs-installer";

/// Absolute paths of everything nodeup reads or writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLayout {
    pub project_root: PathBuf,
    pub vendor_dir: PathBuf,
    pub bin_dir: PathBuf,
    /// Where the local runtime is extracted
    pub target_dir: PathBuf,
}

impl InstallLayout {
    /// Resolve host and plugin settings against the project root
    ///
    /// The target directory defaults to
    /// `<vendor-dir>/<owner>/downloads/nodejs`. A target that would contain
    /// the project, vendor or bin directory is rejected.
    pub fn resolve(
        project_root: &Path,
        host: &HostConfig,
        plugin: &PluginConfig,
        owner: &str,
    ) -> Result<Self> {
        let vendor_dir = project_root.join(&host.vendor_dir);
        let bin_dir = project_root.join(host.bin_dir());
        let target_dir = match &plugin.target_dir {
            Some(dir) => normalize(&project_root.join(dir)),
            None => Self::default_target_dir(&vendor_dir, owner),
        };

        let layout = Self {
            project_root: project_root.to_path_buf(),
            vendor_dir,
            bin_dir,
            target_dir,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check that wiping `target_dir` cannot touch project files
    pub fn validate(&self) -> Result<()> {
        let target = normalize(&self.target_dir);

        for (label, dir) in self.protected_dirs() {
            if normalize(dir).starts_with(&target) {
                return Err(Error::invalid_config(format!(
                    "targetDir {} would contain the {} {}",
                    self.target_dir.display(),
                    label,
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// True when `dir` is one of the protected directories or an ancestor of one
    pub fn is_protected(&self, dir: &Path) -> bool {
        let dir = normalize(dir);
        self.protected_dirs()
            .into_iter()
            .any(|(_, protected)| normalize(protected).starts_with(&dir))
    }

    fn protected_dirs(&self) -> [(&'static str, &Path); 3] {
        [
            ("project root", self.project_root.as_path()),
            ("vendor directory", self.vendor_dir.as_path()),
            ("bin directory", self.bin_dir.as_path()),
        ]
    }

    pub fn default_target_dir(vendor_dir: &Path, owner: &str) -> PathBuf {
        owner
            .split('/')
            .fold(vendor_dir.to_path_buf(), |dir, segment| dir.join(segment))
            .join("downloads")
            .join("nodejs")
    }
}

/// Resolve `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
