//! # nodeup-core
//!
//! Core library for nodeup providing:
//! - The error taxonomy shared by every crate
//! - Node.js version numbers and version constraints
//! - Plugin and host configuration loading
//! - Path helpers used when linking bin scripts

pub mod config;
pub mod constraint;
pub mod error;
pub mod utils;
pub mod version;

pub use config::{ConfigLoader, HostConfig, PluginConfig};
pub use constraint::VersionConstraint;
pub use error::{Error, Result};
pub use utils::{closest_file_path, make_path_relative};
pub use version::NodeVersion;
