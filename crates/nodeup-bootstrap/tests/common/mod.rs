//! Common test utilities for orchestrator tests

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fakes;

pub use fakes::*;
