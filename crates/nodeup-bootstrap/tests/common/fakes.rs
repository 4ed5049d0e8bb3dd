//! Recording fakes for the installer and version source seams

use async_trait::async_trait;
use nodeup_bootstrap::{BootstrapContext, InstallLayout};
use nodeup_core::{Error, NodeVersion, PluginConfig, Result, VersionConstraint};
use nodeup_installer::{Probe, RuntimeInstaller, VersionSource};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub fn v(version: &str) -> NodeVersion {
    NodeVersion::parse(version).unwrap()
}

pub fn layout() -> InstallLayout {
    InstallLayout {
        project_root: PathBuf::from("/srv/shop"),
        vendor_dir: PathBuf::from("/srv/shop/vendor"),
        bin_dir: PathBuf::from("/srv/shop/vendor/bin"),
        target_dir: PathBuf::from("/srv/shop/vendor/mouf/nodejs-installer/downloads/nodejs"),
    }
}

pub fn context(constraint: &str, plugin: PluginConfig) -> BootstrapContext {
    BootstrapContext::new(layout(), plugin, VersionConstraint::parse(constraint).unwrap())
}

pub fn use_global() -> PluginConfig {
    PluginConfig {
        use_global: true,
        ..Default::default()
    }
}

/// Installer fake; a successful install becomes the local version
#[derive(Default)]
pub struct FakeInstaller {
    pub global: Option<NodeVersion>,
    pub npm_found: bool,
    pub local: Mutex<Option<NodeVersion>>,
    pub fail_install: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, version: &str, npm_found: bool) -> Self {
        self.global = Some(v(version));
        self.npm_found = npm_found;
        self
    }

    pub fn with_local(self, version: &str) -> Self {
        *self.local.lock().unwrap() = Some(v(version));
        self
    }

    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn installs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("install "))
            .collect()
    }

    pub fn script_writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("scripts "))
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl RuntimeInstaller for FakeInstaller {
    async fn global_version(&self) -> Option<NodeVersion> {
        self.record("global_version");
        self.global
    }

    fn global_path(&self, command: &str) -> Probe {
        self.record(format!("global_path {}", command));
        if command == "npm" && self.npm_found {
            Probe::Found(PathBuf::from("/usr/bin/npm"))
        } else {
            Probe::NotFound
        }
    }

    async fn local_version(&self, _bin_dir: &Path) -> Option<NodeVersion> {
        self.record("local_version");
        *self.local.lock().unwrap()
    }

    async fn install(&self, version: &NodeVersion, target_dir: &Path) -> Result<PathBuf> {
        self.record(format!("install {}", version));
        if self.fail_install {
            return Err(Error::download("https://nodejs.org/dist/", "HTTP 503"));
        }
        *self.local.lock().unwrap() = Some(*version);
        Ok(target_dir.to_path_buf())
    }

    fn create_bin_scripts(
        &self,
        bin_dir: &Path,
        _target_dir: &Path,
        is_local: bool,
    ) -> Result<Vec<PathBuf>> {
        let scope = if is_local { "local" } else { "global" };
        self.record(format!("scripts {}", scope));
        Ok(["node", "npm", "npx"].iter().map(|name| bin_dir.join(name)).collect())
    }

    fn register_path(&self, bin_dir: &Path, current_path: &str) -> String {
        self.record("register_path");
        format!("{}:{}", bin_dir.display(), current_path)
    }
}

/// Version source fake counting how often the index is fetched
pub struct FakeVersions {
    versions: Vec<NodeVersion>,
    fetches: Mutex<usize>,
}

impl FakeVersions {
    pub fn new(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(|version| v(version)).collect(),
            fetches: Mutex::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl VersionSource for FakeVersions {
    async fn list(&self) -> Result<Vec<NodeVersion>> {
        *self.fetches.lock().unwrap() += 1;
        Ok(self.versions.clone())
    }
}
