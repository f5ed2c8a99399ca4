//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{
    AirportInfoTool, GAirmetTool, MetarTool, PirepTool, RouteWeatherTool, SigmetTool, TafTool,
};
#[cfg(feature = "http")]
use super::ToolError;
use crate::domains::upstream::WeatherSource;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    source: Arc<dyn WeatherSource>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            MetarTool::NAME,
            TafTool::NAME,
            PirepTool::NAME,
            RouteWeatherTool::NAME,
            SigmetTool::NAME,
            GAirmetTool::NAME,
            AirportInfoTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            MetarTool::to_tool(),
            TafTool::to_tool(),
            PirepTool::to_tool(),
            RouteWeatherTool::to_tool(),
            SigmetTool::to_tool(),
            GAirmetTool::to_tool(),
            AirportInfoTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let source = self.source.clone();
        match name {
            MetarTool::NAME => MetarTool::http_handler(arguments, source).await,
            TafTool::NAME => TafTool::http_handler(arguments, source).await,
            PirepTool::NAME => PirepTool::http_handler(arguments, source).await,
            RouteWeatherTool::NAME => RouteWeatherTool::http_handler(arguments, source).await,
            SigmetTool::NAME => SigmetTool::http_handler(arguments, source).await,
            GAirmetTool::NAME => GAirmetTool::http_handler(arguments, source).await,
            AirportInfoTool::NAME => AirportInfoTool::http_handler(arguments, source).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}
