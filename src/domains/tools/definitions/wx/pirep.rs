//! PIREP tool.
//!
//! Pilot reports around an airport. The airport is looked up first so an
//! unknown code fails clearly; the report query itself is keyed by the code
//! and radius, not by the resolved coordinates.

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

use super::airport::lookup_airport;
use super::common::{default_radius, into_result, normalize_code, text_or};
use crate::domains::tools::ToolError;
use crate::domains::upstream::{Endpoint, QueryParams, WeatherSource};

/// Parameters for the PIREP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PirepParams {
    /// ICAO airport code.
    #[schemars(description = "ICAO airport code (e.g. KJFK)")]
    pub airport_code: String,

    /// Search radius around the airport.
    #[schemars(description = "Search radius in miles (default: 50)")]
    #[serde(default = "default_radius")]
    pub radius: u32,
}

/// Pilot report tool.
#[derive(Debug, Clone)]
pub struct PirepTool;

impl PirepTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_pireps";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get pilot reports (PIREPs) of observed flight conditions within a radius of an airport.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(airport = %params.airport_code, radius = params.radius))]
    pub async fn execute(params: &PirepParams, source: &dyn WeatherSource) -> CallToolResult {
        info!(
            "PIREP tool called for: {} (radius {})",
            params.airport_code, params.radius
        );
        into_result(Self::fetch(params, source).await, "PIREPs")
    }

    async fn fetch(params: &PirepParams, source: &dyn WeatherSource) -> Result<String, ToolError> {
        let code = normalize_code(&params.airport_code);
        if lookup_airport(source, &code).await?.is_none() {
            return Err(ToolError::airport_not_found(&code));
        }

        let query = QueryParams::new()
            .with("id", code.as_str())
            .with("distance", params.radius);
        let body = source.fetch_text(Endpoint::Pirep, query).await?;

        Ok(text_or(&body, || {
            format!("No PIREPs found within {} miles of {}", params.radius, code)
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: PirepParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PirepParams>(),
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
                let params: PirepParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, source.as_ref()).await)
            }
            .boxed()
        })
    }
}
