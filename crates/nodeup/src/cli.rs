//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// nodeup - install and link a Node.js toolchain for a Composer project
#[derive(Parser, Debug)]
#[command(name = "nodeup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project directory holding composer.json
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project_dir: Utf8PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make a Node.js matching the project's constraints available
    Install(InstallArgs),

    /// Remove the local Node.js install and its bin scripts
    Uninstall(UninstallArgs),

    /// List published versions, optionally filtered by a constraint
    Versions(VersionsArgs),

    /// Show the artifact URL for a version and platform
    Resolve(ResolveArgs),

    /// Show the global and local installs
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Accept a compatible global Node.js
    #[arg(long)]
    pub use_global: bool,

    /// Always install locally
    #[arg(long, conflicts_with = "use_global")]
    pub force_local: bool,

    /// Prepend the bin directory to PATH
    #[arg(long)]
    pub include_bin_in_path: bool,

    /// Install directory, relative to the project directory
    #[arg(long)]
    pub target_dir: Option<String>,

    /// Distribution mirror
    #[arg(long)]
    pub dist_url: Option<String>,

    /// Hide download progress
    #[arg(long)]
    pub no_progress: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Only list versions matching this constraint (e.g. ">=8 <10")
    pub constraint: Option<String>,

    /// Show at most this many versions, newest first
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Distribution mirror
    #[arg(long)]
    pub dist_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Node.js version (e.g. 10.0.0 or v10.0.0)
    #[arg(id = "node_version", value_name = "VERSION")]
    pub version: String,

    /// Operating system (linux, macos, windows, solaris); detected when omitted
    #[arg(long)]
    pub os: Option<String>,

    /// Machine name as reported by `uname -m` (x86_64, armv7l, ...)
    #[arg(long)]
    pub machine: Option<String>,

    /// Pointer width
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(["32", "64"]))]
    pub bits: Option<String>,

    /// Distribution mirror
    #[arg(long)]
    pub dist_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
