//! Shared HTTP client construction

use nodeup_core::{Error, Result};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("nodeup/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for listing and downloads
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::installer(format!("Failed to create HTTP client: {}", e)))
}
