//! Tool-specific error types.

use thiserror::Error;

use crate::domains::upstream::ApiError;

/// Errors that can occur during tool operations.
///
/// Tool handlers never let these escape: they are rendered into an error
/// `CallToolResult` with the operation as prefix.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The airport lookup returned no record for the identifier.
    #[error("Could not find airport: {0}")]
    AirportNotFound(String),

    /// The weather API call failed.
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "airport not found" error.
    pub fn airport_not_found(code: impl Into<String>) -> Self {
        Self::AirportNotFound(code.into())
    }
}
