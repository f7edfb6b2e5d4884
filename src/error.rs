//! Error types for the Thesaurize library.
//!
//! All errors are represented by the [`ThesaurizeError`] enum. The variants follow
//! the failure modes of the system: fetching a source, reading its container,
//! parsing individual thesaurus records, talking to the synonym store, and waiting
//! for the store to announce that a load has finished.
//!
//! # Examples
//!
//! ```
//! use thesaurize::error::{Result, ThesaurizeError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ThesaurizeError::fetch("unknown protocol gopher"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Thesaurize operations.
///
/// Only [`ThesaurizeError::Parse`] is recoverable: the loader logs it and moves on
/// to the next record. Everything else aborts the operation that raised it.
#[derive(Error, Debug)]
pub enum ThesaurizeError {
    /// I/O errors (file operations, reading the data file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A source or index could not be fetched, or the remote answered with a
    /// non-success status.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The fetched content is not in the expected shape (e.g. the archive holds no
    /// thesaurus data file, or the filter index is not valid JSON).
    #[error("Format error: {0}")]
    Format(String),

    /// A single thesaurus record is malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The key-value backend is unreachable or a transaction failed.
    #[error("Store error: {0}")]
    Store(String),

    /// The readiness wait exceeded its budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// An unexpected payload arrived on the readiness channel.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Thread join errors
    #[error("Thread join error: {0}")]
    ThreadJoin(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ThesaurizeError.
pub type Result<T> = std::result::Result<T, ThesaurizeError>;

impl ThesaurizeError {
    /// Create a new fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Fetch(msg.into())
    }

    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Format(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Parse(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Store(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Timeout(msg.into())
    }

    /// Create a new protocol error.
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Protocol(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ThesaurizeError::Other(msg.into())
    }

    /// Whether the operation that produced this error may skip the offending item
    /// and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ThesaurizeError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ThesaurizeError::fetch("unknown protocol gopher");
        assert_eq!(error.to_string(), "Fetch error: unknown protocol gopher");

        let error = ThesaurizeError::format("no data file");
        assert_eq!(error.to_string(), "Format error: no data file");

        let error = ThesaurizeError::timeout("no readiness after 1s");
        assert_eq!(error.to_string(), "Timeout: no readiness after 1s");
    }

    #[test]
    fn test_only_parse_errors_are_recoverable() {
        assert!(ThesaurizeError::parse("bad header").is_recoverable());
        assert!(!ThesaurizeError::store("connection refused").is_recoverable());
        assert!(!ThesaurizeError::protocol("unexpected payload").is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ThesaurizeError::from(io_error);

        match error {
            ThesaurizeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
