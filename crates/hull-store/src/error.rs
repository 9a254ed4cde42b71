//! Store error types.

use thiserror::Error;

/// Errors raised by local content stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The resolved location does not (or no longer) exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The relative path would escape the store root.
    #[error("path escapes store root: {0}")]
    InvalidPath(String),

    /// Underlying file-system failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
