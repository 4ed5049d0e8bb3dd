//! Uninstall command

use anyhow::{Context, Result};
use camino::Utf8Path;
use nodeup_bootstrap::{unload, BootstrapContext};

use super::load_project;
use crate::cli::UninstallArgs;
use crate::output;

pub fn run(args: UninstallArgs, project_dir: &Utf8Path) -> Result<()> {
    let project = load_project(project_dir)?;
    let context = BootstrapContext::load(&project)?;

    let removed = unload(&context.layout).context("Failed to remove the local Node.js install")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&removed)?);
        return Ok(());
    }

    if removed.is_empty() {
        output::info("Nothing to remove");
    } else {
        for path in &removed {
            output::path_kv("Removed", path);
        }
        output::success("Local Node.js uninstalled");
    }

    Ok(())
}
