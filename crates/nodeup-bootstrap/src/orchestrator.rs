//! Bootstrap orchestrator
//!
//! `dispatch` decides between a compatible global Node.js and a local
//! install, installs the best published version when needed, links the bin
//! scripts, and optionally computes the new search path. `unload` removes
//! everything a local install left behind.

use nodeup_core::{Error, NodeVersion, Result};
use nodeup_installer::bin_scripts::script_names;
use nodeup_installer::{
    find_best_matching_version, is_version_matching, Probe, RuntimeInstaller, VersionSource,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::context::BootstrapContext;
use crate::layout::InstallLayout;

/// Where the runtime used by the project comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallSource {
    Global,
    Local,
}

/// Outcome of the install decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallDecision {
    pub source: InstallSource,
    /// Version freshly installed by this run, `None` when nothing was installed
    pub chosen_version: Option<NodeVersion>,
    pub target_dir: PathBuf,
}

/// Everything one dispatch did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub decision: InstallDecision,
    pub constraint: String,
    /// Bin scripts written by this run
    pub scripts: Vec<PathBuf>,
    /// New `PATH` value when the bin directory is registered
    pub search_path: Option<String>,
}

/// What is currently installed, without changing anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub constraint: String,
    pub layout: InstallLayout,
    pub global_version: Option<NodeVersion>,
    pub global_matches: bool,
    pub npm: Probe,
    pub local_version: Option<NodeVersion>,
    pub local_matches: bool,
}

/// Runs the install decision procedure for one project
pub struct Bootstrap<I, S> {
    context: BootstrapContext,
    installer: I,
    versions: S,
}

impl<I, S> Bootstrap<I, S>
where
    I: RuntimeInstaller,
    S: VersionSource,
{
    pub fn new(context: BootstrapContext, installer: I, versions: S) -> Self {
        Self {
            context,
            installer,
            versions,
        }
    }

    pub fn context(&self) -> &BootstrapContext {
        &self.context
    }

    pub fn installer(&self) -> &I {
        &self.installer
    }

    pub fn versions(&self) -> &S {
        &self.versions
    }

    /// Make a compatible Node.js available to the project
    pub async fn dispatch(&self) -> Result<DispatchReport> {
        let constraint = &self.context.constraint;
        let plugin = &self.context.plugin;
        let layout = &self.context.layout;

        debug!("Requested version: {}", constraint);

        let source = self.choose_source().await;

        let (chosen_version, scripts) = match source {
            // The global runtime is used as found on the search path
            InstallSource::Global => (None, Vec::new()),
            InstallSource::Local => match self.install_local_version().await? {
                Some(version) => {
                    let scripts = self
                        .installer
                        .create_bin_scripts(&layout.bin_dir, &layout.target_dir, true)?;
                    (Some(version), scripts)
                }
                None => (None, Vec::new()),
            },
        };

        let search_path = plugin.include_bin_in_path.then(|| {
            let current = std::env::var("PATH").unwrap_or_default();
            self.installer.register_path(&layout.bin_dir, &current)
        });

        Ok(DispatchReport {
            decision: InstallDecision {
                source,
                chosen_version,
                target_dir: layout.target_dir.clone(),
            },
            constraint: constraint.to_string(),
            scripts,
            search_path,
        })
    }

    /// Inspect global and local installs against the constraint
    pub async fn status(&self) -> StatusReport {
        let constraint = &self.context.constraint;
        let global_version = self.installer.global_version().await;
        let local_version = self
            .installer
            .local_version(&self.context.layout.bin_dir)
            .await;

        StatusReport {
            constraint: constraint.to_string(),
            layout: self.context.layout.clone(),
            global_matches: global_version
                .as_ref()
                .is_some_and(|v| is_version_matching(v, constraint)),
            npm: self.installer.global_path("npm"),
            local_matches: local_version
                .as_ref()
                .is_some_and(|v| is_version_matching(v, constraint)),
            global_version,
            local_version,
        }
    }

    async fn choose_source(&self) -> InstallSource {
        let plugin = &self.context.plugin;

        if plugin.force_local {
            debug!("Local install forced by configuration");
            return InstallSource::Local;
        }
        if !plugin.use_global {
            return InstallSource::Local;
        }

        let Some(global_version) = self.installer.global_version().await else {
            debug!("No global Node.js install found");
            return InstallSource::Local;
        };
        debug!("Global Node.js install found: v{}", global_version);

        if !self.installer.global_path("npm").is_found() {
            info!("Global Node.js install found but npm is missing; installing locally");
            return InstallSource::Local;
        }

        if !is_version_matching(&global_version, &self.context.constraint) {
            info!(
                "Global Node.js v{} does not match {}; installing locally",
                global_version, self.context.constraint
            );
            return InstallSource::Local;
        }

        debug!("Global Node.js install matches the requested version");
        InstallSource::Global
    }

    /// Install locally unless a matching local install already exists
    async fn install_local_version(&self) -> Result<Option<NodeVersion>> {
        let constraint = &self.context.constraint;

        if let Some(local) = self.installer.local_version(&self.context.layout.bin_dir).await {
            debug!("Local Node.js install found: v{}", local);
            if is_version_matching(&local, constraint) {
                info!("Local Node.js v{} matches {}", local, constraint);
                return Ok(None);
            }
        }

        let listed = self.versions.list().await?;
        let best = find_best_matching_version(&listed, constraint)
            .ok_or_else(|| Error::no_matching_version(constraint.to_string()))?;

        self.installer
            .install(&best, &self.context.layout.target_dir)
            .await?;
        Ok(Some(best))
    }
}

/// Remove the managed install and every bin script, returning what was removed
///
/// Nothing is deleted when the layout fails validation.
pub fn unload(layout: &InstallLayout) -> Result<Vec<PathBuf>> {
    layout.validate()?;

    let mut removed = Vec::new();

    if layout.target_dir.is_dir() {
        fs::remove_dir_all(&layout.target_dir)?;
        debug!("Removed {}", layout.target_dir.display());
        removed.push(layout.target_dir.clone());

        if let Some(parent) = layout.target_dir.parent() {
            if !layout.is_protected(parent) && fs::read_dir(parent)?.next().is_none() {
                fs::remove_dir(parent)?;
                debug!("Removed empty {}", parent.display());
                removed.push(parent.to_path_buf());
            }
        }
    }

    for name in script_names(false).into_iter().chain(script_names(true)) {
        let script = layout.bin_dir.join(name);
        if script.is_file() {
            fs::remove_file(&script)?;
            debug!("Removed {}", script.display());
            removed.push(script);
        }
    }

    Ok(removed)
}
