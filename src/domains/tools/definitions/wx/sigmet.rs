//! SIGMET tool.
//!
//! Domestic SIGMETs/AIRMETs or international SIGMETs as raw text.

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

use super::common::{into_result, text_or};
use crate::domains::tools::ToolError;
use crate::domains::upstream::{Endpoint, QueryParams, WeatherSource};

/// Which advisory feed to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SigmetRegion {
    #[default]
    Us,
    International,
}

impl SigmetRegion {
    fn endpoint(self) -> Endpoint {
        match self {
            Self::Us => Endpoint::AirSigmet,
            Self::International => Endpoint::ISigmet,
        }
    }
}

/// Parameters for the SIGMET tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SigmetParams {
    #[schemars(description = "Region: 'us' for domestic or 'international' (default: us)")]
    #[serde(default)]
    pub region: SigmetRegion,

    /// Optional hazard filter passed through to the API.
    #[schemars(description = "Hazard type filter (e.g. conv, turb, ice, ifr)")]
    #[serde(default)]
    pub hazard: Option<String>,
}

/// SIGMET tool.
#[derive(Debug, Clone)]
pub struct SigmetTool;

impl SigmetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_sigmets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get SIGMETs (hazardous weather advisories), domestic US or international, optionally filtered by hazard type.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(region = ?params.region))]
    pub async fn execute(params: &SigmetParams, source: &dyn WeatherSource) -> CallToolResult {
        info!("SIGMET tool called for region {:?}", params.region);
        into_result(Self::fetch(params, source).await, "SIGMETs")
    }

    async fn fetch(params: &SigmetParams, source: &dyn WeatherSource) -> Result<String, ToolError> {
        let hazard = params
            .hazard
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let query = QueryParams::new().with_opt("hazard", hazard);
        let body = source.fetch_text(params.region.endpoint(), query).await?;
        Ok(text_or(&body, || {
            "No SIGMETs found for the specified criteria".to_string()
        }))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: SigmetParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SigmetParams>(),
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
                let params: SigmetParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, source.as_ref()).await)
            }
            .boxed()
        })
    }
}
