//! Manifest sources
//!
//! The bootstrap orchestrator reads packages and configuration through
//! `ManifestSource`. `ComposerProject` implements it over the files Composer
//! leaves on disk.

use nodeup_core::{ConfigLoader, Error, HostConfig, PluginConfig, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::package::Package;

pub use nodeup_core::utils::ROOT_MANIFEST;

/// Access to the host project's packages and configuration
pub trait ManifestSource {
    /// Directory holding the root manifest
    fn project_root(&self) -> &Path;

    /// The root package
    fn root_package(&self) -> &Package;

    /// Every installed (non-root) package
    fn installed_packages(&self) -> &[Package];

    /// Root package first, then installed packages
    fn packages(&self) -> Vec<&Package> {
        std::iter::once(self.root_package())
            .chain(self.installed_packages())
            .collect()
    }

    /// Plugin options from the root package's `extra.mouf.nodejs`
    fn plugin_config(&self) -> Result<PluginConfig> {
        ConfigLoader::new().load_plugin_config(Some(&self.root_package().extra_value()))
    }

    /// Vendor and bin directories from the root package's `config`
    fn host_config(&self) -> Result<HostConfig> {
        ConfigLoader::new().load_host_config(self.root_package().config.as_ref())
    }
}

/// A Composer project read from `composer.json` and `installed.json`
#[derive(Debug, Clone)]
pub struct ComposerProject {
    root_dir: PathBuf,
    root: Package,
    installed: Vec<Package>,
}

impl ComposerProject {
    /// Load the project rooted at `root_dir`
    ///
    /// A missing `installed.json` means nothing is installed yet.
    pub fn load(root_dir: &Path) -> Result<Self> {
        let manifest_path = root_dir.join(ROOT_MANIFEST);
        let content = fs::read_to_string(&manifest_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::manifest(manifest_path.display().to_string(), "file not found")
            } else {
                Error::Io(e)
            }
        })?;

        let root: Package = serde_json::from_str(&content)
            .map_err(|e| Error::manifest(manifest_path.display().to_string(), e.to_string()))?;

        let host = ConfigLoader::new().load_host_config(root.config.as_ref())?;
        let installed_path = root_dir
            .join(&host.vendor_dir)
            .join("composer")
            .join("installed.json");

        let installed = if installed_path.is_file() {
            Self::read_installed(&installed_path)?
        } else {
            debug!("No installed packages at {}", installed_path.display());
            Vec::new()
        };

        debug!(
            "Loaded {} with {} installed packages",
            manifest_path.display(),
            installed.len()
        );

        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            root,
            installed,
        })
    }

    /// Build a project from already-parsed packages
    pub fn from_parts(
        root_dir: impl Into<PathBuf>,
        root: Package,
        installed: Vec<Package>,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            root,
            installed,
        }
    }

    /// Parse `installed.json` in either the Composer 1 (bare array) or
    /// Composer 2 (`{"packages": [...]}`) layout
    fn read_installed(path: &Path) -> Result<Vec<Package>> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| Error::manifest(path.display().to_string(), e.to_string()))?;

        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut object) => match object.remove("packages") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(Error::manifest(
                        path.display().to_string(),
                        "expected a \"packages\" array",
                    ))
                }
            },
            _ => {
                return Err(Error::manifest(
                    path.display().to_string(),
                    "expected an array or an object",
                ))
            }
        };

        entries
            .into_iter()
            .map(|entry| {
                serde_json::from_value(entry)
                    .map_err(|e| Error::manifest(path.display().to_string(), e.to_string()))
            })
            .collect()
    }
}

impl ManifestSource for ComposerProject {
    fn project_root(&self) -> &Path {
        &self.root_dir
    }

    fn root_package(&self) -> &Package {
        &self.root
    }

    fn installed_packages(&self) -> &[Package] {
        &self.installed
    }
}
