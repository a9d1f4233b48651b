//! Crate-internal test suites that span several modules.

mod common;
mod property;
