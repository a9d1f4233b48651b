//! Common Test Utilities
//!
//! Shared fixtures for data directories and gambit lists.

pub mod fixtures;

pub use fixtures::*;
