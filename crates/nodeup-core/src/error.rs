//! Error types for nodeup-core

use thiserror::Error;

/// Result type alias using nodeup-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving and installing a Node.js toolchain.
///
/// Every variant is fatal for the current run; nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote version index could not be fetched or parsed
    #[error("Error while querying {url}: {message}")]
    Listing { url: String, message: String },

    /// An artifact could not be fetched, or the transfer produced no file
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// No artifact exists for this OS/architecture/version combination
    #[error("{message}")]
    UnsupportedPlatform { message: String },

    /// Extraction, self-update, or directory write failure
    #[error("{message}")]
    Installer { message: String },

    /// Nothing in the candidate list satisfies the merged constraint
    #[error(
        "No Node.js version could be found for constraint '{constraint}'. \
         Relax the version constraint or install a matching Node.js globally."
    )]
    NoMatchingVersion { constraint: String },

    /// Malformed version string
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// Malformed version constraint
    #[error("Invalid version constraint '{constraint}': {message}")]
    InvalidConstraint { constraint: String, message: String },

    /// A manifest could not be read or has an unexpected shape
    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: String, message: String },

    /// Invalid plugin or host configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Bin script template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a listing error
    pub fn listing(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listing {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported platform error
    pub fn unsupported_platform(message: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            message: message.into(),
        }
    }

    /// Create an installer error
    pub fn installer(message: impl Into<String>) -> Self {
        Self::Installer {
            message: message.into(),
        }
    }

    /// Create a no matching version error
    pub fn no_matching_version(constraint: impl Into<String>) -> Self {
        Self::NoMatchingVersion {
            constraint: constraint.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create an invalid constraint error
    pub fn invalid_constraint(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Create a manifest error
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
