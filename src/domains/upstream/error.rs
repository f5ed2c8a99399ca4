//! Upstream error types.

use thiserror::Error;

/// Result type for upstream calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while talking to the weather API.
///
/// The underlying cause is logged where the error is created; only its
/// message travels with the error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The API answered with a non-success status code.
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    /// DNS, connection or timeout failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The payload did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unexpected shape error.
    pub fn unexpected_shape(msg: impl Into<String>) -> Self {
        Self::UnexpectedShape(msg.into())
    }
}
