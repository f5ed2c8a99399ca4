//! Logical endpoints of the weather API.

use std::fmt;

/// One logical endpoint, mapped to a single path segment under the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Metar,
    Taf,
    Pirep,
    /// Domestic SIGMETs and AIRMETs.
    AirSigmet,
    /// International SIGMETs.
    ISigmet,
    GAirmet,
    Airport,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Metar => "metar",
            Self::Taf => "taf",
            Self::Pirep => "pirep",
            Self::AirSigmet => "airsigmet",
            Self::ISigmet => "isigmet",
            Self::GAirmet => "gairmet",
            Self::Airport => "airport",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
