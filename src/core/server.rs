//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/wx/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::tools::build_tool_router;
use crate::domains::upstream::{AviationWeatherClient, WeatherSource};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Aviation weather server. Use get_metar and get_taf for airport \
observations and forecasts, get_pireps for pilot reports, get_sigmets and get_gairmets for \
hazard advisories, get_airport_info for airport data, and get_route_weather for a briefing \
between two airports. Airports are identified by ICAO code (e.g. KJFK).";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. The weather
/// source is built once and shared by every tool.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Upstream weather data source shared by all tools.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    source: Arc<dyn WeatherSource>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the aviation weather API.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let base = &config.upstream.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::config(format!(
                "weather API base URL must be http(s): {}",
                base
            )));
        }

        let client = AviationWeatherClient::new(&config.upstream)?;
        info!("Using weather API at {}", client.base_url());
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create a server over an arbitrary weather source.
    pub fn with_source(config: Config, source: Arc<dyn WeatherSource>) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: build_tool_router::<Self>(source.clone()),
            source,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Usage instructions reported to clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.source.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::wx::testing::FakeSource;

    fn test_server() -> McpServer {
        McpServer::with_source(
            Config::default(),
            Arc::new(FakeSource::always(serde_json::json!("KJFK 010000Z"))),
        )
    }

    #[test]
    fn test_server_lists_seven_tools() {
        let tools = test_server().list_tools();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_server_info_advertises_tools_only() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_new_rejects_non_http_base() {
        let mut config = Config::default();
        config.upstream.base_url = "ftp://example.com".to_string();
        assert!(matches!(McpServer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_with_default_config() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "aviation-weather-mcp");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_server_call_tool() {
        let result = test_server()
            .call_tool("get_taf", serde_json::json!({"airport_code": "KJFK"}))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["text"], "KJFK 010000Z");
    }
}
