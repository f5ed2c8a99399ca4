//! Route weather tool.
//!
//! Builds a briefing for a departure/destination pair: METAR and TAF at both
//! ends plus PIREPs around the route midpoint.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::airport::lookup_airport;
use super::common::{into_result, normalize_code};
use super::format::format_route_briefing;
use super::geo::{distance_nm, midpoint, search_radius_nm};
use super::models::{AirportRecord, RouteBriefing};
use crate::domains::tools::ToolError;
use crate::domains::upstream::{ApiError, Endpoint, QueryParams, WeatherSource};

/// Parameters for the route weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RouteWeatherParams {
    /// Departure airport ICAO code.
    #[schemars(description = "Departure airport ICAO code (e.g. KBOS)")]
    pub departure: String,

    /// Destination airport ICAO code.
    #[schemars(description = "Destination airport ICAO code (e.g. KPHL)")]
    pub destination: String,
}

/// Route weather briefing tool.
#[derive(Debug, Clone)]
pub struct RouteWeatherTool;

impl RouteWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_route_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a weather briefing for a route between two airports: METAR and TAF at departure and destination, approximate distance, and PIREPs near the route midpoint.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(departure = %params.departure, destination = %params.destination))]
    pub async fn execute(params: &RouteWeatherParams, source: &dyn WeatherSource) -> CallToolResult {
        info!(
            "Route weather tool called: {} -> {}",
            params.departure, params.destination
        );
        into_result(Self::fetch(params, source).await, "route weather")
    }

    async fn fetch(
        params: &RouteWeatherParams,
        source: &dyn WeatherSource,
    ) -> Result<String, ToolError> {
        let departure = normalize_code(&params.departure);
        let destination = normalize_code(&params.destination);

        let (dep_airport, dest_airport) = futures::try_join!(
            lookup_airport(source, &departure),
            lookup_airport(source, &destination),
        )?;
        let dep_coords = Self::coordinates(dep_airport, &departure)?;
        let dest_coords = Self::coordinates(dest_airport, &destination)?;

        let (departure_metar, departure_taf, destination_metar, destination_taf) = futures::try_join!(
            Self::raw(source, Endpoint::Metar, &departure),
            Self::raw(source, Endpoint::Taf, &departure),
            Self::raw(source, Endpoint::Metar, &destination),
            Self::raw(source, Endpoint::Taf, &destination),
        )?;

        let distance = distance_nm(dep_coords, dest_coords);
        let mid = midpoint(dep_coords, dest_coords);
        let radius = search_radius_nm(distance);
        debug!(
            "Route {} -> {}: {:.1} nm, midpoint {:?}, radius {} nm",
            departure, destination, distance, mid, radius
        );

        let query = QueryParams::new()
            .with("lat", mid.0)
            .with("lon", mid.1)
            .with("distance", radius);
        let enroute_pireps = source.fetch_text(Endpoint::Pirep, query).await?;

        Ok(format_route_briefing(&RouteBriefing {
            departure,
            destination,
            distance_nm: distance,
            midpoint: mid,
            departure_metar,
            departure_taf,
            destination_metar,
            destination_taf,
            search_radius_nm: radius,
            enroute_pireps,
        }))
    }

    fn coordinates(airport: Option<AirportRecord>, code: &str) -> Result<(f64, f64), ToolError> {
        let airport = airport.ok_or_else(|| ToolError::airport_not_found(code))?;
        airport.coordinates().ok_or_else(|| {
            ToolError::from(ApiError::unexpected_shape(format!(
                "no coordinates for airport {}",
                code
            )))
        })
    }

    async fn raw(
        source: &dyn WeatherSource,
        endpoint: Endpoint,
        code: &str,
    ) -> Result<String, ApiError> {
        source
            .fetch_text(endpoint, QueryParams::new().with("ids", code))
            .await
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        source: Arc<dyn WeatherSource>,
    ) -> Result<serde_json::Value, String> {
        let params: RouteWeatherParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())?;
        let result = Self::execute(&params, source.as_ref()).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RouteWeatherParams>(),
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
                let params: RouteWeatherParams =
                    serde_json::from_value(serde_json::Value::Object(args))
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
    use crate::domains::tools::definitions::wx::testing::{FakeSource, ids, result_text};
    use serde_json::json;

    const BOS_METAR: &str = "KBOS 011254Z 28012KT 10SM FEW045 02/M09 A3012";
    const BOS_TAF: &str = "TAF KBOS 011120Z 0112/0218 28012G20KT P6SM FEW045";
    const PHL_METAR: &str = "KPHL 011254Z 27008KT 10SM CLR 04/M07 A3015";
    const PHL_TAF: &str = "TAF KPHL 011120Z 0112/0218 27010KT P6SM SKC";

    fn route_source(pireps: &'static str) -> FakeSource {
        FakeSource::new(move |endpoint, params| {
            let id = ids(params).unwrap_or_default();
            match (endpoint, id.as_str()) {
                (Endpoint::Airport, "KBOS") => {
                    Ok(json!([{"icaoId": "KBOS", "lat": 42.3656, "lon": -71.0096}]))
                }
                (Endpoint::Airport, "KPHL") => {
                    Ok(json!([{"icaoId": "KPHL", "lat": 39.8719, "lon": -75.2411}]))
                }
                (Endpoint::Airport, _) => Ok(json!([])),
                (Endpoint::Metar, "KBOS") => Ok(json!(BOS_METAR)),
                (Endpoint::Taf, "KBOS") => Ok(json!(BOS_TAF)),
                (Endpoint::Metar, "KPHL") => Ok(json!(PHL_METAR)),
                (Endpoint::Taf, "KPHL") => Ok(json!(PHL_TAF)),
                (Endpoint::Pirep, _) => Ok(json!(pireps)),
                _ => Ok(json!("")),
            }
        })
    }

    fn params(dep: &str, dest: &str) -> RouteWeatherParams {
        RouteWeatherParams {
            departure: dep.to_string(),
            destination: dest.to_string(),
        }
    }

    #[tokio::test]
    async fn test_route_briefing_bos_phl() {
        let source = route_source("UA /OV JFK/TM 1300/FL120/TP A320/TB MOD");
        let result = RouteWeatherTool::execute(&params("KBOS", "KPHL"), &source).await;

        assert_eq!(result.is_error, Some(false));
        let text = result_text(&result);
        assert!(text.contains("KBOS"));
        assert!(text.contains("KPHL"));
        assert!(text.contains("Distance: ~243 nm"));

        let positions: Vec<usize> = [BOS_METAR, BOS_TAF, PHL_METAR, PHL_TAF]
            .iter()
            .map(|excerpt| text.find(excerpt).expect("excerpt missing"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("UA /OV JFK/TM 1300/FL120/TP A320/TB MOD"));
    }

    #[tokio::test]
    async fn test_route_pirep_query_uses_midpoint_and_radius() {
        let source = route_source("");
        let result = RouteWeatherTool::execute(&params("kbos", "kphl"), &source).await;
        assert!(result_text(&result).ends_with("No PIREPs found en-route"));

        let seen = source.seen();
        assert_eq!(seen.len(), 7);
        let pirep = seen.last().unwrap();
        assert_eq!(pirep.endpoint, Endpoint::Pirep);
        let query: Vec<(String, String)> = serde_urlencoded::from_str(&pirep.query).unwrap();
        let value = |name: &str| -> String {
            query.iter().find(|(k, _)| k == name).unwrap().1.clone()
        };
        let lat: f64 = value("lat").parse().unwrap();
        let lon: f64 = value("lon").parse().unwrap();
        assert!((lat - 41.11875).abs() < 1e-9);
        assert!((lon + 73.12535).abs() < 1e-9);
        assert_eq!(value("distance"), "81");
        assert_eq!(value("format"), "raw");
    }

    #[tokio::test]
    async fn test_route_unknown_destination() {
        let source = route_source("");
        let result = RouteWeatherTool::execute(&params("KBOS", "KZZZ"), &source).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result_text(&result),
            "Error fetching route weather: Could not find airport: KZZZ"
        );
    }

    #[tokio::test]
    async fn test_route_missing_sections_fall_back() {
        let source = FakeSource::new(|endpoint, params| match endpoint {
            Endpoint::Airport if ids(params).as_deref() == Some("KAAA") => {
                Ok(json!([{"lat": 10.0, "lon": 10.0}]))
            }
            Endpoint::Airport => Ok(json!([{"lat": 11.0, "lon": 10.0}])),
            _ => Ok(json!("")),
        });
        let result = RouteWeatherTool::execute(&params("KAAA", "KBBB"), &source).await;

        assert_eq!(result.is_error, Some(false));
        let text = result_text(&result);
        assert_eq!(text.matches("Not available").count(), 4);
        assert!(text.contains("Distance: ~60 nm"));
        assert!(text.contains("within 50 nm of midpoint"));
    }
}
