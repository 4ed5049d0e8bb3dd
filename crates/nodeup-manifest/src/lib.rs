//! # nodeup-manifest
//!
//! Reads the host project's package manifests:
//! - `Package` with its Node.js constraint and PSR-4 namespaces
//! - `ManifestSource` trait consumed by the bootstrap orchestrator
//! - `ComposerProject`, the `composer.json` + `installed.json` adapter
//! - Owner lookup and constraint merging across packages

pub mod owner;
pub mod package;
pub mod source;

pub use owner::{find_owner, merged_constraint, Owner, OWNER_NAMESPACE};
pub use package::Package;
pub use source::{ComposerProject, ManifestSource, ROOT_MANIFEST};
