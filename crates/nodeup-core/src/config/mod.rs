//! Configuration loading and management

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HostConfig, PluginConfig, DEFAULT_DIST_URL};
