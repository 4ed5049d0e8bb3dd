//! Resolve command

use anyhow::Result;
use camino::Utf8Path;
use nodeup_core::NodeVersion;
use nodeup_installer::{AssetResolver, HostOs, PlatformDescriptor};
use serde::Serialize;

use super::versions::configured_dist_url;
use crate::cli::ResolveArgs;
use crate::output;

#[derive(Serialize)]
struct Resolution {
    version: NodeVersion,
    platform: String,
    url: String,
    dist_type: String,
}

pub fn run(args: ResolveArgs, project_dir: &Utf8Path) -> Result<()> {
    let version = NodeVersion::parse(&args.version)?;
    let platform = platform_from_args(&args);

    let dist_url = match args.dist_url {
        Some(url) => url,
        None => configured_dist_url(project_dir),
    };
    let asset = AssetResolver::new(dist_url).resolve(&version, &platform)?;

    if args.json {
        let resolution = Resolution {
            version,
            platform: platform.to_string(),
            url: asset.url,
            dist_type: asset.dist_type.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        output::kv("Platform", &platform.to_string());
        output::kv("Type", &asset.dist_type.to_string());
        println!("{}", asset.url);
    }

    Ok(())
}

/// Detected platform with any explicit overrides applied
fn platform_from_args(args: &ResolveArgs) -> PlatformDescriptor {
    let detected = PlatformDescriptor::detect();
    let os = args.os.as_deref().map_or(detected.os, HostOs::from_name);
    let bits = args
        .bits
        .as_deref()
        .and_then(|bits| bits.parse().ok())
        .unwrap_or(detected.bits);
    let machine = args.machine.clone().unwrap_or(detected.machine);
    PlatformDescriptor::new(os, bits, machine)
}
