//! # nodeup-bootstrap
//!
//! The decision procedure behind `install` and `uninstall`:
//! - Resolve the project layout and the merged version constraint
//! - Prefer a compatible global Node.js when allowed, else a local one
//! - Install the best published version when nothing local matches
//! - Link bin scripts and optionally register the bin directory on `PATH`

pub mod context;
pub mod layout;
pub mod orchestrator;
pub mod strategy;

pub use context::BootstrapContext;
pub use layout::InstallLayout;
pub use orchestrator::{
    unload, Bootstrap, DispatchReport, InstallDecision, InstallSource, StatusReport,
};
pub use strategy::should_allow;
