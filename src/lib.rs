/// Gambit Editor - BNPC gambit script generator (TUI Edition)
///
/// Reads BNPC and action data sets, lets the user build an ordered gambit
/// list in a terminal form, and renders a C++ battle script from it.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
