//! CLI command implementations

pub mod install;
pub mod resolve;
pub mod status;
pub mod uninstall;
pub mod versions;

use anyhow::{Context, Result};
use camino::Utf8Path;
use nodeup_manifest::ComposerProject;
use std::path::PathBuf;

/// Absolute path of the project directory
fn project_root(project_dir: &Utf8Path) -> Result<PathBuf> {
    project_dir
        .as_std_path()
        .canonicalize()
        .with_context(|| format!("Project directory {} does not exist", project_dir))
}

/// Load the Composer project in `project_dir`
fn load_project(project_dir: &Utf8Path) -> Result<ComposerProject> {
    let root = project_root(project_dir)?;
    ComposerProject::load(&root)
        .with_context(|| format!("Failed to read project in {}", root.display()))
}
