//! nodeup CLI - project-local Node.js toolchains
//!
//! Entry point for the `nodeup` command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Install(args) => commands::install::run(args, &cli.project_dir, cli.quiet).await,
        Commands::Uninstall(args) => commands::uninstall::run(args, &cli.project_dir),
        Commands::Versions(args) => commands::versions::run(args, &cli.project_dir).await,
        Commands::Resolve(args) => commands::resolve::run(args, &cli.project_dir),
        Commands::Status(args) => commands::status::run(args, &cli.project_dir).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Install progress is logged at info
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
