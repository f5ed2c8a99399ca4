//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the upstream weather API.
    #[error("Upstream error: {0}")]
    Upstream(#[from] crate::domains::upstream::ApiError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure building the HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failures while serving.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
