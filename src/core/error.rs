//! Error types for the gambit editor core.
//!
//! The data source and the output writer never surface these across the
//! presentation boundary: they log them and degrade to an empty record list
//! or a `false` flag. The typed variants stay available to the core and tests.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Diagnostic, Debug)]
pub enum EditorError {
    // =========================================================================
    // Lookup data
    // =========================================================================

    /// A data set file could not be read.
    #[error("Failed to read data set {path}: {source}")]
    #[diagnostic(code(gambit_editor::data::read))]
    DataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data set file was read but is not a JSON array of the expected records.
    #[error("Failed to parse data set {path}: {source}")]
    #[diagnostic(
        code(gambit_editor::data::parse),
        help("expected a JSON array of records")
    )]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Selection state
    // =========================================================================

    /// A gambit ordinal outside `1..=len` was addressed.
    #[error("Gambit ordinal {ordinal} is out of range (1..={len})")]
    #[diagnostic(code(gambit_editor::gambits::ordinal))]
    OrdinalOutOfRange { ordinal: usize, len: usize },

    // =========================================================================
    // Output
    // =========================================================================

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    #[diagnostic(code(gambit_editor::output::dir))]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generated script could not be written.
    #[error("Failed to write script {path}: {source}")]
    #[diagnostic(code(gambit_editor::output::write))]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Terminal
    // =========================================================================

    /// Terminal setup, rendering or teardown failed.
    #[error("Terminal error: {0}")]
    #[diagnostic(code(gambit_editor::terminal))]
    Terminal(#[from] std::io::Error),
}
