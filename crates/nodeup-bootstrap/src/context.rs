//! Everything dispatch needs, resolved once from the manifest source

use nodeup_core::{PluginConfig, Result, VersionConstraint};
use nodeup_manifest::{find_owner, merged_constraint, ManifestSource, OWNER_NAMESPACE};
use tracing::debug;

use crate::layout::{InstallLayout, DEFAULT_OWNER};

/// Resolved inputs of one bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapContext {
    pub layout: InstallLayout,
    pub plugin: PluginConfig,
    /// Intersection of every package's declared constraint
    pub constraint: VersionConstraint,
    /// Name of the package owning the installer namespace
    pub owner: String,
}

impl BootstrapContext {
    pub fn new(layout: InstallLayout, plugin: PluginConfig, constraint: VersionConstraint) -> Self {
        Self {
            layout,
            plugin,
            constraint,
            owner: DEFAULT_OWNER.to_string(),
        }
    }

    /// Resolve the context using the plugin options declared in the manifest
    pub fn load<S: ManifestSource + ?Sized>(source: &S) -> Result<Self> {
        let plugin = source.plugin_config()?;
        Self::with_plugin_config(source, plugin)
    }

    /// Resolve the context with plugin options already layered by the caller
    pub fn with_plugin_config<S: ManifestSource + ?Sized>(
        source: &S,
        plugin: PluginConfig,
    ) -> Result<Self> {
        let packages = source.packages();
        let host = source.host_config()?;

        let owner = find_owner(packages.iter().copied(), OWNER_NAMESPACE)
            .package()
            .map(|package| package.name.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());

        let constraint = merged_constraint(packages.iter().copied())?;
        let layout = InstallLayout::resolve(source.project_root(), &host, &plugin, &owner)?;

        debug!("Owner package: {}", owner);
        debug!("Install directory: {}", layout.target_dir.display());

        Ok(Self {
            layout,
            plugin,
            constraint,
            owner,
        })
    }
}
