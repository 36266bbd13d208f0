//! Error types for the vigie library.
//!
//! All fallible operations return [`Result`], backed by the [`VigieError`]
//! enum. The taxonomy is deliberately narrow: scoring and searching are
//! total functions over defensively-coerced input, so the only errors that
//! reach a caller are malformed filters and snapshot I/O.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for vigie operations.
#[derive(Error, Debug)]
pub enum VigieError {
    /// I/O errors while reading a collection snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A structurally invalid search filter (out-of-range or inverted
    /// bounds). Raised rather than silently coerced so caller bugs
    /// surface immediately.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`VigieError`].
pub type Result<T> = std::result::Result<T, VigieError>;

impl VigieError {
    /// Create a new invalid filter error.
    pub fn invalid_filter<S: Into<String>>(msg: S) -> Self {
        VigieError::InvalidFilter(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VigieError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = VigieError::invalid_filter("score_min above score_max");
        assert_eq!(
            error.to_string(),
            "Invalid filter: score_min above score_max"
        );

        let error = VigieError::other("something went wrong");
        assert_eq!(error.to_string(), "Error: something went wrong");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let vigie_error = VigieError::from(io_error);

        match vigie_error {
            VigieError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
