//! Airport information tool.
//!
//! Also hosts the airport lookup shared by the PIREP and route tools.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::common::{into_result, normalize_code};
use super::format::format_airport_info;
use super::models::AirportRecord;
use crate::domains::tools::ToolError;
use crate::domains::upstream::{ApiError, Endpoint, JsonFormat, QueryParams, WeatherSource};

/// Look up an airport record by ICAO code.
///
/// `Ok(None)` means the API knows no such airport.
pub async fn lookup_airport(
    source: &dyn WeatherSource,
    code: &str,
) -> Result<Option<AirportRecord>, ApiError> {
    let payload = source
        .fetch_json(
            Endpoint::Airport,
            QueryParams::new().with("ids", code),
            JsonFormat::Json,
        )
        .await?;
    debug!("Airport lookup for {} returned {}", code, payload);
    airport_from_payload(payload)
}

fn airport_from_payload(payload: Value) -> Result<Option<AirportRecord>, ApiError> {
    let record = match payload {
        Value::Null => return Ok(None),
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        record @ Value::Object(_) => record,
        other => {
            return Err(ApiError::unexpected_shape(format!(
                "expected airport records, got {}",
                other
            )));
        }
    };

    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| ApiError::unexpected_shape(format!("malformed airport record: {}", e)))
}

/// Parameters for the airport information tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AirportInfoParams {
    /// ICAO airport code.
    #[schemars(description = "ICAO airport code (e.g. KJFK)")]
    pub airport_code: String,
}

/// Airport information tool.
#[derive(Debug, Clone)]
pub struct AirportInfoTool;

impl AirportInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_airport_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get airport information: name, location, coordinates, elevation and runways.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(airport = %params.airport_code))]
    pub async fn execute(params: &AirportInfoParams, source: &dyn WeatherSource) -> CallToolResult {
        info!("Airport info tool called for: {}", params.airport_code);
        into_result(Self::fetch(params, source).await, "airport info")
    }

    async fn fetch(
        params: &AirportInfoParams,
        source: &dyn WeatherSource,
    ) -> Result<String, ToolError> {
        let code = normalize_code(&params.airport_code);
        let airport = lookup_airport(source, &code)
            .await?
            .ok_or_else(|| ToolError::airport_not_found(&code))?;
        Ok(format_airport_info(&code, &airport))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: AirportInfoParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AirportInfoParams>(),
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
                let params: AirportInfoParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, source.as_ref()).await)
            }
            .boxed()
        })
    }
}
