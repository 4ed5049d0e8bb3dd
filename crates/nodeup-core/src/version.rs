//! Node.js version numbers
//!
//! Node.js releases are plain `major.minor.patch` triples. Comparison is
//! numeric per component, left to right, so `10.0.0 > 9.9.9`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A released Node.js version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl NodeVersion {
    /// Create a version from its components
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version, accepting the `v` prefix printed by `node -v`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let mut parts = digits.split('.');
        let mut component = || -> Result<u64> {
            parts
                .next()
                .and_then(|p| p.parse::<u64>().ok())
                .ok_or_else(|| Error::invalid_version(trimmed))
        };

        let version = Self::new(component()?, component()?, component()?);

        if parts.next().is_some() {
            return Err(Error::invalid_version(trimmed));
        }

        Ok(version)
    }

    /// Convert into a `semver::Version` for requirement matching
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for NodeVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodeVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<NodeVersion> for String {
    fn from(version: NodeVersion) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_prefixed() {
        assert_eq!(NodeVersion::parse("8.10.0").unwrap(), NodeVersion::new(8, 10, 0));
        assert_eq!(NodeVersion::parse("v10.0.0\n").unwrap(), NodeVersion::new(10, 0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(NodeVersion::parse("8.10").is_err());
        assert!(NodeVersion::parse("8.10.0.1").is_err());
        assert!(NodeVersion::parse("v8.x.0").is_err());
        assert!(NodeVersion::parse("").is_err());
        assert!(NodeVersion::parse("8.10.0-rc.1").is_err());
    }

    #[test]
    fn test_numeric_ordering() {
        let ten = NodeVersion::new(10, 0, 0);
        let nine = NodeVersion::new(9, 9, 9);
        assert!(ten > nine);
        assert!(NodeVersion::new(8, 10, 0) > NodeVersion::new(8, 9, 0));
        assert!(NodeVersion::new(0, 12, 18) < NodeVersion::new(4, 0, 0));
    }

    #[test]
    fn test_display_roundtrips_through_serde() {
        let version = NodeVersion::new(6, 11, 2);
        assert_eq!(version.to_string(), "6.11.2");

        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"6.11.2\"");
        let back: NodeVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
    }
}
