//! Aviation weather tools module.
//!
//! Tools backed by the aviation weather data API:
//! - `metar`: current surface observation
//! - `taf`: terminal aerodrome forecast
//! - `pirep`: pilot reports around an airport
//! - `route`: composite briefing for a departure/destination pair
//! - `sigmet`: domestic or international SIGMETs
//! - `gairmet`: decoded graphical AIRMETs
//! - `airport`: airport metadata and runways
//!
//! Shared pieces: `models` (decoded records), `format` (text rendering),
//! `geo` (route distance and midpoint) and `common` (result helpers).

pub mod airport;
pub mod common;
pub mod format;
pub mod gairmet;
pub mod geo;
pub mod metar;
pub mod models;
pub mod pirep;
pub mod route;
pub mod sigmet;
pub mod taf;

#[cfg(test)]
pub(crate) mod testing;

pub use airport::{AirportInfoParams, AirportInfoTool};
pub use gairmet::{GAirmetParams, GAirmetTool};
pub use metar::{MetarParams, MetarTool};
pub use pirep::{PirepParams, PirepTool};
pub use route::{RouteWeatherParams, RouteWeatherTool};
pub use sigmet::{SigmetParams, SigmetRegion, SigmetTool};
pub use taf::{TafParams, TafTool};
