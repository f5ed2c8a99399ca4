//! Upstream weather data domain.
//!
//! This module owns every interaction with the public aviation weather API:
//! endpoint paths, query parameter encoding, and response decoding.
//!
//! ## Architecture
//!
//! - `endpoint.rs` - Logical endpoints and their path segments
//! - `query.rs` - Query parameters (absent values are never stored)
//! - `client.rs` - `WeatherSource` trait and the reqwest-backed client
//! - `error.rs` - Upstream error types
//!
//! Tools depend on `WeatherSource` only, so tests can swap in an in-memory
//! source without touching the network.

mod client;
mod endpoint;
mod error;
mod query;

pub use client::{AviationWeatherClient, JsonFormat, WeatherSource};
pub use endpoint::Endpoint;
pub use error::{ApiError, ApiResult};
pub use query::{ParamValue, QueryParams};
