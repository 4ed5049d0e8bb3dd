//! Remote version listing
//!
//! The distribution mirror serves a plain directory index; every
//! `vMAJOR.MINOR.PATCH/` link in it is a released version.

use async_trait::async_trait;
use nodeup_core::config::DEFAULT_DIST_URL;
use nodeup_core::{Error, NodeVersion, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::http::build_client;
use crate::traits::VersionSource;

/// Pre-compiled regex for release directory links
static RELEASE_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d+)\.(\d+)\.(\d+)/").expect("release regex is valid"));

/// Fetches the list of published versions from a mirror
pub struct VersionLister {
    client: reqwest::Client,
    index_url: String,
}

impl VersionLister {
    /// Create a lister for `dist_url`
    pub fn new(dist_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(build_client()?, dist_url))
    }

    /// Create a lister for the official mirror
    pub fn official() -> Result<Self> {
        Self::new(DEFAULT_DIST_URL)
    }

    /// Create a lister reusing an existing HTTP client
    pub fn with_client(client: reqwest::Client, dist_url: impl Into<String>) -> Self {
        Self {
            client,
            index_url: dist_url.into(),
        }
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Fetch the index and extract every advertised version
    pub async fn list(&self) -> Result<Vec<NodeVersion>> {
        debug!("Fetching version index from {}", self.index_url);

        let response = self
            .client
            .get(&self.index_url)
            .send()
            .await
            .map_err(|e| Error::listing(&self.index_url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::listing(
                &self.index_url,
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::listing(&self.index_url, e.to_string()))?;

        let versions = parse_listing(&body);
        if versions.is_empty() {
            return Err(Error::listing(&self.index_url, "no versions found"));
        }

        debug!("Found {} published versions", versions.len());
        Ok(versions)
    }
}

#[async_trait]
impl VersionSource for VersionLister {
    async fn list(&self) -> Result<Vec<NodeVersion>> {
        VersionLister::list(self).await
    }
}

/// Extract release versions from an index page, first occurrence order
pub fn parse_listing(html: &str) -> Vec<NodeVersion> {
    let mut versions: Vec<NodeVersion> = Vec::new();

    for caps in RELEASE_DIR_RE.captures_iter(html) {
        let component = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
        if let (Some(major), Some(minor), Some(patch)) =
            (component(1), component(2), component(3))
        {
            let version = NodeVersion::new(major, minor, patch);
            if !versions.contains(&version) {
                versions.push(version);
            }
        }
    }

    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html>
<head><title>Index of /dist/</title></head>
<body>
<h1>Index of /dist/</h1><hr><pre><a href="../">../</a>
<a href="latest-v8.x/">latest-v8.x/</a>    29-Mar-2018 17:15    -
<a href="npm/">npm/</a>    08-Jan-2014 21:05    -
<a href="v0.12.18/">v0.12.18/</a>    22-Feb-2017 18:15    -
<a href="v8.9.0/">v8.9.0/</a>    31-Oct-2017 18:01    -
<a href="v8.10.0/">v8.10.0/</a>    07-Mar-2018 00:54    -
<a href="v10.0.0/">v10.0.0/</a>    24-Apr-2018 14:50    -
<a href="index.json">index.json</a>    24-Apr-2018 15:07    190393
</pre><hr></body>
</html>"#;

    #[test]
    fn test_parse_listing_in_order() {
        let versions = parse_listing(INDEX);
        assert_eq!(
            versions,
            vec![
                NodeVersion::new(0, 12, 18),
                NodeVersion::new(8, 9, 0),
                NodeVersion::new(8, 10, 0),
                NodeVersion::new(10, 0, 0),
            ]
        );
    }

    #[test]
    fn test_parse_listing_ignores_non_release_links() {
        let html = "<a href=\"latest/\">latest/</a> v8.x/ node-v8.1.0.tar.gz";
        assert!(parse_listing(html).is_empty());
    }

    #[test]
    fn test_parse_listing_deduplicates() {
        // Each release appears both in href and in the link text
        let versions = parse_listing(r#"<a href="v6.0.0/">v6.0.0/</a>"#);
        assert_eq!(versions, vec![NodeVersion::new(6, 0, 0)]);
    }
}
