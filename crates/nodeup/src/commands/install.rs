//! Install command

use anyhow::{Context, Result};
use camino::Utf8Path;
use nodeup_bootstrap::{should_allow, Bootstrap, BootstrapContext, DispatchReport, InstallSource};
use nodeup_installer::{NodeInstaller, VersionLister};
use nodeup_manifest::{ManifestSource, OWNER_NAMESPACE};

use super::load_project;
use crate::cli::InstallArgs;
use crate::output;

pub async fn run(args: InstallArgs, project_dir: &Utf8Path, quiet: bool) -> Result<()> {
    let project = load_project(project_dir)?;

    if !should_allow(project.packages()) {
        output::warning(&format!(
            "No installed package provides {}; nothing to do",
            OWNER_NAMESPACE
        ));
        return Ok(());
    }

    let mut plugin = project.plugin_config()?;
    if args.use_global {
        plugin.use_global = true;
    }
    if args.force_local {
        plugin.force_local = true;
    }
    if args.include_bin_in_path {
        plugin.include_bin_in_path = true;
    }
    if let Some(target_dir) = args.target_dir {
        plugin.target_dir = Some(target_dir);
    }
    if let Some(dist_url) = args.dist_url {
        plugin.dist_url = dist_url;
    }

    let context = BootstrapContext::with_plugin_config(&project, plugin)?;
    let installer = NodeInstaller::new(&context.layout.vendor_dir, &context.plugin.dist_url)?
        .with_progress(!args.no_progress && !quiet && !args.json);
    let lister = VersionLister::new(context.plugin.dist_url.clone())?;

    let bootstrap = Bootstrap::new(context, installer, lister);
    let report = bootstrap
        .dispatch()
        .await
        .context("Failed to install Node.js")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &DispatchReport) {
    let decision = &report.decision;
    match (decision.source, &decision.chosen_version) {
        (InstallSource::Global, _) => {
            output::success(&format!("Using the global Node.js install ({})", report.constraint));
        }
        (InstallSource::Local, Some(version)) => {
            output::success(&format!(
                "Node.js v{} installed in {}",
                version,
                decision.target_dir.display()
            ));
        }
        (InstallSource::Local, None) => {
            output::success(&format!("Local Node.js already matches {}", report.constraint));
        }
    }

    for script in &report.scripts {
        output::path_kv("Linked", script);
    }

    // This process exits after dispatch; the calling shell applies it
    if let Some(search_path) = &report.search_path {
        output::info("Add the bin directory to PATH with:");
        println!("{}", export_line(search_path));
    }
}

fn export_line(search_path: &str) -> String {
    format!("export PATH=\"{}\"", search_path)
}
