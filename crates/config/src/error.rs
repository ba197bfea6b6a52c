//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type for the config crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading, parsing, or validating a configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem read error.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// RON parse error.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A field combination the engines cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}
