//! G-AIRMET tool.
//!
//! Decoded graphical AIRMETs, rendered as numbered blocks when the API
//! returns a list.

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

use super::common::into_result;
use super::format::format_gairmets;
use super::models::{GAirmetHazard, GAirmetPayload, GAirmetType};
use crate::domains::tools::ToolError;
use crate::domains::upstream::{Endpoint, JsonFormat, QueryParams, WeatherSource};

/// Parameters for the G-AIRMET tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GAirmetParams {
    #[schemars(description = "Advisory type: sierra (IFR/mountain obscuration), tango (turbulence/wind), zulu (icing/freezing level)")]
    #[serde(rename = "type", default)]
    pub advisory_type: Option<GAirmetType>,

    #[schemars(description = "Hazard filter: turb-hi, turb-lo, llws, sfc_wind, ifr, mtn_obs, ice, fzlvl")]
    #[serde(default)]
    pub hazard: Option<GAirmetHazard>,
}

/// G-AIRMET tool.
#[derive(Debug, Clone)]
pub struct GAirmetTool;

impl GAirmetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_gairmets";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get G-AIRMETs (graphical AIRMETs), optionally filtered by advisory type and hazard.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(params: &GAirmetParams, source: &dyn WeatherSource) -> CallToolResult {
        info!(
            "G-AIRMET tool called (type {:?}, hazard {:?})",
            params.advisory_type, params.hazard
        );
        into_result(Self::fetch(params, source).await, "G-AIRMETs")
    }

    async fn fetch(params: &GAirmetParams, source: &dyn WeatherSource) -> Result<String, ToolError> {
        let query = QueryParams::new()
            .with_opt("type", params.advisory_type.map(GAirmetType::as_str))
            .with_opt("hazard", params.hazard.map(GAirmetHazard::as_str));
        let payload = source
            .fetch_json(Endpoint::GAirmet, query, JsonFormat::Decoded)
            .await?;

        Ok(format_gairmets(&GAirmetPayload::from(payload))
            .unwrap_or_else(|| "No G-AIRMETs found for the specified criteria".to_string()))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: GAirmetParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GAirmetParams>(),
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
                let params: GAirmetParams = serde_json::from_value(serde_json::Value::Object(args))
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
    use serde_json::json;

    #[tokio::test]
    async fn test_gairmets_list_is_numbered() {
        let source = FakeSource::always(json!([
            {"type": "SIERRA", "hazard": "IFR", "validTime": "2024-01-01T03:00:00Z"},
            {"type": "TANGO", "hazard": "TURB-LO", "area": "Great Lakes"}
        ]));
        let params = GAirmetParams {
            advisory_type: Some(GAirmetType::Sierra),
            hazard: Some(GAirmetHazard::Ifr),
        };
        let result = GAirmetTool::execute(&params, &source).await;

        let text = result_text(&result);
        assert!(text.contains("G-AIRMET #1"));
        assert!(text.contains("G-AIRMET #2"));
        assert!(text.contains("Area: Not specified"));
        assert!(text.contains("Valid: Not specified"));

        let seen = source.seen();
        assert_eq!(seen[0].endpoint, Endpoint::GAirmet);
        assert_eq!(seen[0].query, "type=sierra&hazard=ifr&format=decoded");
    }

    #[tokio::test]
    async fn test_gairmets_text_passes_through() {
        let source = FakeSource::always(json!("\nGAIRMET TANGO UPDT 2\n"));
        let result = GAirmetTool::execute(&GAirmetParams::default(), &source).await;
        assert_eq!(result_text(&result), "GAIRMET TANGO UPDT 2");
        assert_eq!(source.seen()[0].query, "format=decoded");
    }

    #[tokio::test]
    async fn test_gairmets_empty() {
        let source = FakeSource::always(json!([]));
        let result = GAirmetTool::execute(&GAirmetParams::default(), &source).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "No G-AIRMETs found for the specified criteria"
        );
    }

    #[test]
    fn test_gairmet_params_reject_unknown_hazard() {
        let err = serde_json::from_value::<GAirmetParams>(json!({"hazard": "volcanic"}));
        assert!(err.is_err());

        let ok: GAirmetParams =
            serde_json::from_value(json!({"type": "zulu", "hazard": "fzlvl"})).unwrap();
        assert_eq!(ok.advisory_type, Some(GAirmetType::Zulu));
        assert_eq!(ok.hazard, Some(GAirmetHazard::Fzlvl));
    }
}
