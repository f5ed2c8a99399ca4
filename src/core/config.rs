//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default base URL of the aviation weather data API.
pub const DEFAULT_WEATHER_API_BASE: &str = "https://aviationweather.gov/api/data";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream weather API configuration.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Upstream weather API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; each endpoint appends one path segment.
    pub base_url: String,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_API_BASE.to_string(),
            user_agent: format!("aviation-weather-mcp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "aviation-weather-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_WEATHER_API_BASE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_WEATHER_API_BASE") {
            let base_url = base_url.trim().trim_end_matches('/').to_string();
            if !base_url.is_empty() {
                info!("Weather API base URL set to {}", base_url);
                config.upstream.base_url = base_url;
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_WEATHER_USER_AGENT") {
            config.upstream.user_agent = user_agent;
        }

        config
    }
}
