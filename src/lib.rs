//! Aviation Weather MCP Server Library
//!
//! This crate exposes aviation weather queries (METAR, TAF, PIREPs, SIGMETs,
//! G-AIRMETs, airport data and route briefings) as Model Context Protocol
//! tools backed by a public aviation weather data API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **upstream**: the weather API client
//!   - **tools**: MCP tools and response formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use aviation_weather_mcp::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
