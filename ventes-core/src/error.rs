//! Error types for ventes-core

use thiserror::Error;

/// Main error type for the ventes-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (opening or reading a source file)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Fatal error while ingesting a source
    #[error("ingest error in {kind} source: {message}")]
    Ingest { kind: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for ventes-core
pub type Result<T> = std::result::Result<T, Error>;
