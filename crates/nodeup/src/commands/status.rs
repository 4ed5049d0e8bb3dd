//! Status command

use anyhow::Result;
use camino::Utf8Path;
use nodeup_bootstrap::{Bootstrap, BootstrapContext, StatusReport};
use nodeup_core::NodeVersion;
use nodeup_installer::{NodeInstaller, VersionLister};
use owo_colors::OwoColorize;

use super::load_project;
use crate::cli::StatusArgs;
use crate::output;

pub async fn run(args: StatusArgs, project_dir: &Utf8Path) -> Result<()> {
    let project = load_project(project_dir)?;
    let context = BootstrapContext::load(&project)?;

    let installer = NodeInstaller::new(&context.layout.vendor_dir, &context.plugin.dist_url)?;
    let lister = VersionLister::new(context.plugin.dist_url.clone())?;
    let bootstrap = Bootstrap::new(context, installer, lister);

    let status = bootstrap.status().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let plugin = &bootstrap.context().plugin;
    output::header(&format!("Node.js for {}", status.layout.project_root.display()));
    output::kv("Constraint", &status.constraint);
    output::kv("Platform", &bootstrap.installer().platform().to_string());
    output::kv("Use global", &plugin.use_global.to_string());
    output::kv("Force local", &plugin.force_local.to_string());

    println!("\nInstalls:");
    output::kv("Global", &describe(status.global_version, status.global_matches));
    output::kv(
        "npm",
        &status
            .npm
            .path()
            .map_or_else(|| "not found".to_string(), |path| path.display().to_string()),
    );
    output::kv("Local", &describe(status.local_version, status.local_matches));

    print_layout(&status);
    Ok(())
}

fn describe(version: Option<NodeVersion>, matches: bool) -> String {
    match version {
        Some(version) if matches => format!("v{} {}", version, "(matches)".green()),
        Some(version) => format!("v{} {}", version, "(does not match)".red()),
        None => "not installed".dimmed().to_string(),
    }
}

fn print_layout(status: &StatusReport) {
    println!("\nLayout:");
    output::path_kv("Bin directory", &status.layout.bin_dir);
    output::path_kv("Install directory", &status.layout.target_dir);
}
