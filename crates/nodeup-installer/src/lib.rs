//! # nodeup-installer
//!
//! Everything that touches the outside world on behalf of the bootstrap:
//! - Platform detection and download URL resolution
//! - Remote version listing and best-version matching
//! - Global/local install probes
//! - Artifact download, extraction, and bin-script generation
//! - Search path registration

pub mod bin_scripts;
pub mod download;
pub mod http;
pub mod installer;
pub mod lister;
pub mod matcher;
pub mod path_env;
pub mod platform;
pub mod probe;
pub mod traits;

pub use bin_scripts::{BinScriptSpec, BinScriptWriter};
pub use download::Downloader;
pub use installer::NodeInstaller;
pub use lister::{parse_listing, VersionLister};
pub use matcher::{find_best_matching_version, is_version_matching};
pub use path_env::{apply_search_path, prepend_search_path};
pub use platform::{AssetReference, AssetResolver, DistType, HostOs, PlatformDescriptor};
pub use probe::{Probe, ProcessProbe};
pub use traits::{RuntimeInstaller, VersionSource};
