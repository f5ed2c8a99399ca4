//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod wx;

pub use wx::{
    AirportInfoParams, AirportInfoTool, GAirmetParams, GAirmetTool, MetarParams, MetarTool,
    PirepParams, PirepTool, RouteWeatherParams, RouteWeatherTool, SigmetParams, SigmetRegion,
    SigmetTool, TafParams, TafTool,
};
