//! TAF tool.
//!
//! Fetches the terminal aerodrome forecast for an airport as raw text.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{into_result, normalize_code, text_or};
use crate::domains::tools::ToolError;
use crate::domains::upstream::{Endpoint, QueryParams, WeatherSource};

/// Parameters for the TAF tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TafParams {
    /// ICAO airport code.
    #[schemars(description = "ICAO airport code (e.g. KJFK)")]
    pub airport_code: String,
}

/// Terminal forecast (TAF) tool.
#[derive(Debug, Clone)]
pub struct TafTool;

impl TafTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_taf";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the TAF (terminal aerodrome forecast, typically covering 24-30 hours) for an airport, as raw text.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(airport = %params.airport_code))]
    pub async fn execute(params: &TafParams, source: &dyn WeatherSource) -> CallToolResult {
        info!("TAF tool called for: {}", params.airport_code);
        into_result(Self::fetch(params, source).await, "TAF")
    }

    async fn fetch(params: &TafParams, source: &dyn WeatherSource) -> Result<String, ToolError> {
        let code = normalize_code(&params.airport_code);
        let body = source
            .fetch_text(Endpoint::Taf, QueryParams::new().with("ids", code.as_str()))
            .await?;
        Ok(text_or(&body, || format!("No TAF data available for {}", code)))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: TafParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TafParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(source: Arc<dyn WeatherSource>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let source = source.clone();
            async move {
                let params: TafParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, source.as_ref()).await)
            }
            .boxed()
        })
    }
}
