//! Layered configuration loader
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Root manifest (`extra.mouf.nodejs`, `config`)
//! 3. Environment variables (NODEUP_* prefix)
//! 4. CLI flags (handled by caller)

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;
use tracing::debug;

use super::types::{HostConfig, PluginConfig};
use crate::error::{Error, Result};

/// Loads plugin and host configuration from a root manifest
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load plugin configuration from the root package's `extra` section
    pub fn load_plugin_config(&self, extra: Option<&Value>) -> Result<PluginConfig> {
        let section = extra
            .and_then(|e| e.get("mouf"))
            .and_then(|m| m.get("nodejs"));

        let config = match section {
            Some(value) => Self::from_value::<PluginConfig>(value, "extra.mouf.nodejs")?,
            None => PluginConfig::default(),
        };

        self.apply_env_overrides(config)
    }

    /// Load host configuration from the root package's `config` section
    pub fn load_host_config(&self, config: Option<&Value>) -> Result<HostConfig> {
        match config {
            Some(value) => Self::from_value::<HostConfig>(value, "config"),
            None => Ok(HostConfig::default()),
        }
    }

    fn from_value<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T> {
        serde_json::from_value(value.clone())
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", key, e)))
    }

    /// Apply environment variable overrides to plugin config
    fn apply_env_overrides(&self, mut config: PluginConfig) -> Result<PluginConfig> {
        if let Ok(val) = env::var("NODEUP_USE_GLOBAL") {
            config.use_global = parse_bool("NODEUP_USE_GLOBAL", &val)?;
        }

        if let Ok(val) = env::var("NODEUP_INCLUDE_BIN_IN_PATH") {
            config.include_bin_in_path = parse_bool("NODEUP_INCLUDE_BIN_IN_PATH", &val)?;
        }

        if let Ok(val) = env::var("NODEUP_FORCE_LOCAL") {
            config.force_local = parse_bool("NODEUP_FORCE_LOCAL", &val)?;
        }

        if let Ok(val) = env::var("NODEUP_TARGET_DIR") {
            if !val.is_empty() {
                config.target_dir = Some(val);
            }
        }

        if let Ok(val) = env::var("NODEUP_DIST_URL") {
            if !val.is_empty() {
                config.dist_url = val;
            }
        }

        debug!("Effective plugin configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::invalid_config(format!(
            "{} must be a boolean (true/false)",
            name
        ))),
    }
}
