//! Domains module containing business logic organized by bounded contexts.
//!
//! - **upstream**: access to the aviation weather data API
//! - **tools**: MCP tools built on top of the upstream client

pub mod tools;
pub mod upstream;
