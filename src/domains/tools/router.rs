//! Tool Router - builds the rmcp ToolRouter.
//!
//! This module builds the ToolRouter for STDIO transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AirportInfoTool, GAirmetTool, MetarTool, PirepTool, RouteWeatherTool, SigmetTool, TafTool,
};
use crate::domains::upstream::WeatherSource;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(source: Arc<dyn WeatherSource>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(MetarTool::create_route(source.clone()))
        .with_route(TafTool::create_route(source.clone()))
        .with_route(PirepTool::create_route(source.clone()))
        .with_route(RouteWeatherTool::create_route(source.clone()))
        .with_route(SigmetTool::create_route(source.clone()))
        .with_route(GAirmetTool::create_route(source.clone()))
        .with_route(AirportInfoTool::create_route(source))
}
