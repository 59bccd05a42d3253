//! Error types for Herald

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Herald operations
#[derive(Error, Debug)]
pub enum HeraldError {
    /// No logger type is registered under the given name
    #[error("Unknown logger type: {0}")]
    UnknownType(String),

    /// `scope()` was called without a usable scope name
    #[error("No scope name was defined")]
    EmptyScope,

    /// Log level name outside the fixed severity set
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Color name the painter does not know
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration file could not be parsed
    #[error("Config file error in {path}: {source}")]
    ConfigParse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Write target or file system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using HeraldError
pub type HeraldResult<T> = Result<T, HeraldError>;
