//! Versions command

use anyhow::{Context, Result};
use camino::Utf8Path;
use nodeup_core::{PluginConfig, VersionConstraint};
use nodeup_installer::{find_best_matching_version, VersionLister};
use nodeup_manifest::ManifestSource;
use owo_colors::OwoColorize;
use tracing::debug;

use super::load_project;
use crate::cli::VersionsArgs;
use crate::output;

pub async fn run(args: VersionsArgs, project_dir: &Utf8Path) -> Result<()> {
    let constraint = match &args.constraint {
        Some(constraint) => VersionConstraint::parse(constraint)?,
        None => VersionConstraint::any(),
    };

    let dist_url = match args.dist_url {
        Some(url) => url,
        None => configured_dist_url(project_dir),
    };

    let spinner = (!args.json).then(|| output::spinner(&format!("Fetching {}", dist_url)));
    let lister = VersionLister::new(dist_url.clone())?;
    let listed = lister.list().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let listed = listed.with_context(|| format!("Failed to list versions from {}", dist_url))?;

    let best = find_best_matching_version(&listed, &constraint);
    let mut versions: Vec<_> = listed
        .into_iter()
        .filter(|version| constraint.matches(version))
        .collect();
    versions.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(limit) = args.limit {
        versions.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    if versions.is_empty() {
        output::warning(&format!("No published version matches {}", constraint));
        return Ok(());
    }

    output::header(&format!("Node.js versions matching {}", constraint));
    for version in &versions {
        if Some(*version) == best {
            println!("  {} {}", version.green().bold(), "(best match)".dimmed());
        } else {
            println!("  {}", version);
        }
    }

    Ok(())
}

/// Mirror configured by the project, if there is one
pub(super) fn configured_dist_url(project_dir: &Utf8Path) -> String {
    let plugin = load_project(project_dir)
        .and_then(|project| project.plugin_config().map_err(Into::into));
    match plugin {
        Ok(plugin) => plugin.dist_url,
        Err(e) => {
            debug!("Using the default mirror: {:#}", e);
            PluginConfig::default().dist_url
        }
    }
}
