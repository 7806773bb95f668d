//! Error types for pdfdrop.

use thiserror::Error;

/// Common error type for pdfdrop.
#[derive(Error, Debug)]
pub enum PdfdropError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A candidate filename resolved (or would resolve) outside the storage root.
    #[error("path traversal rejected: {0:?}")]
    PathTraversal(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Upload exceeds the configured size ceiling.
    #[error("payload too large: {actual} bytes exceeds limit of {limit}")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        actual: u64,
        /// Configured maximum upload size.
        limit: u64,
    },

    /// Declared content type or byte signature is not PDF.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Malformed or empty user input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage-level failure (write failed, name collision).
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for pdfdrop operations.
pub type Result<T> = std::result::Result<T, PdfdropError>;
