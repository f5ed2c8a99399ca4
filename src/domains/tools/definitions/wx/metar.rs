//! METAR tool.
//!
//! Fetches the current surface observation for an airport as raw text.

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

/// Parameters for the METAR tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MetarParams {
    /// ICAO airport code.
    #[schemars(description = "ICAO airport code (e.g. KJFK)")]
    pub airport_code: String,
}

/// Current observation (METAR) tool.
#[derive(Debug, Clone)]
pub struct MetarTool;

impl MetarTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_metar";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the current METAR (routine aviation surface weather observation) for an airport, as raw text.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(airport = %params.airport_code))]
    pub async fn execute(params: &MetarParams, source: &dyn WeatherSource) -> CallToolResult {
        info!("METAR tool called for: {}", params.airport_code);
        into_result(Self::fetch(params, source).await, "METAR")
    }

    async fn fetch(params: &MetarParams, source: &dyn WeatherSource) -> Result<String, ToolError> {
        let code = normalize_code(&params.airport_code);
        let body = source
            .fetch_text(Endpoint::Metar, QueryParams::new().with("ids", code.as_str()))
            .await?;
        Ok(text_or(&body, || format!("No METAR data available for {}", code)))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: MetarParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MetarParams>(),
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
                let params: MetarParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, source.as_ref()).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::wx::testing::{FakeSource, result_text};
    use crate::domains::upstream::ApiError;
    use serde_json::json;

    fn params(code: &str) -> MetarParams {
        MetarParams {
            airport_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_metar_passes_through_trimmed_text() {
        let source = FakeSource::always(json!("KJFK 010000Z 31012KT 10SM FEW250 M02/M17 A3034\n"));
        let result = MetarTool::execute(&params("KJFK"), &source).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "KJFK 010000Z 31012KT 10SM FEW250 M02/M17 A3034"
        );

        let seen = source.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].endpoint, Endpoint::Metar);
        assert_eq!(seen[0].query, "ids=KJFK&format=raw");
    }

    #[tokio::test]
    async fn test_metar_blank_body_reports_no_data() {
        let source = FakeSource::always(json!("  \n"));
        let result = MetarTool::execute(&params("kjfk"), &source).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "No METAR data available for KJFK");
    }

    #[tokio::test]
    async fn test_metar_upstream_failure_is_error_result() {
        let source = FakeSource::failing(ApiError::RequestFailed { status: 502 });
        let result = MetarTool::execute(&params("KJFK"), &source).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "Error fetching METAR: Request failed with status 502"
        );
    }

    #[test]
    fn test_metar_params_require_code() {
        assert!(serde_json::from_value::<MetarParams>(json!({})).is_err());
    }
}
