//! Error types for Kindred operations.
//!
//! Layout itself never fails; malformed relationships are dropped from the
//! output instead. Errors only come from the edges of the pipeline: reading
//! member documents, validating configuration and exporting results.

use std::io;

use thiserror::Error;

/// The main error type for Kindred operations.
///
/// The `Parse` variant keeps the source document next to the decoding error
/// so callers can point at the offending line.
#[derive(Debug, Error)]
pub enum KindredError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: serde_json::Error,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for KindredError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KindredError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
