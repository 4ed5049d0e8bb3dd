//! Common test infrastructure for nodeup-installer tests
//!
//! # Modules
//!
//! - `mock_server`: Wiremock setup helpers for the mirror index and artifacts
//! - `scripts`: Fake `node`/`npm` executables and tarball builders

// Not every test file uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_server;
pub mod scripts;

pub use mock_server::*;
pub use scripts::*;
