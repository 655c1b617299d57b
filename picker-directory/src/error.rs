//! Error types for directory access.

use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors that can occur while talking to an entity directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Network error (connection, TLS, timeout at the transport).
    #[error("network error: {0}")]
    Network(String),

    /// The directory answered with a non-success status.
    #[error("directory returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Directory is unavailable (used by test doubles and offline backends).
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
