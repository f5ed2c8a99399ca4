//! Request-scoped records decoded from upstream payloads.
//!
//! Every field is optional: upstream data is frequently partial, and a
//! missing field must stay distinguishable from an empty one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Airport metadata as returned by the airport endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirportRecord {
    #[serde(rename = "icaoId", alias = "icao", default, deserialize_with = "lenient_string")]
    pub identifier: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,

    #[serde(rename = "lat", alias = "latitude", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,

    #[serde(rename = "lon", alias = "longitude", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,

    /// Field elevation in feet.
    #[serde(rename = "elev", alias = "elevation", default, deserialize_with = "lenient_f64")]
    pub elevation: Option<f64>,

    /// `None` unless upstream sent a list.
    #[serde(default, deserialize_with = "lenient_runways")]
    pub runways: Option<Vec<RunwayEntry>>,
}

impl AirportRecord {
    /// Both coordinates, when the record carries them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// One element of an airport's runway list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RunwayEntry {
    Text(String),
    Record(RunwayRecord),
    /// Anything else upstream sends; rendered as unknown.
    Other(Value),
}

impl From<Value> for RunwayEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(_) => match serde_json::from_value(value.clone()) {
                Ok(record) => Self::Record(record),
                Err(_) => Self::Other(value),
            },
            other => Self::Other(other),
        }
    }
}

/// A structured runway description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunwayRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub length: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub width: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub surface: Option<String>,

    /// Combined "LENGTHxWIDTH" form used by some responses.
    #[serde(default, deserialize_with = "lenient_string")]
    pub dimension: Option<String>,
}

impl RunwayRecord {
    /// Length and width, falling back to the combined dimension field.
    pub fn dimensions(&self) -> (Option<String>, Option<String>) {
        if self.length.is_some() || self.width.is_some() {
            return (self.length.clone(), self.width.clone());
        }
        match self.dimension.as_deref().and_then(|d| d.split_once(['x', 'X'])) {
            Some((length, width)) => (non_empty(length), non_empty(width)),
            None => (None, None),
        }
    }
}

/// Advisory types accepted by the G-AIRMET endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GAirmetType {
    Sierra,
    Tango,
    Zulu,
}

impl GAirmetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sierra => "sierra",
            Self::Tango => "tango",
            Self::Zulu => "zulu",
        }
    }
}

/// Hazards accepted by the G-AIRMET endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
pub enum GAirmetHazard {
    #[serde(rename = "turb-hi")]
    TurbHi,
    #[serde(rename = "turb-lo")]
    TurbLo,
    #[serde(rename = "llws")]
    Llws,
    #[serde(rename = "sfc_wind")]
    SfcWind,
    #[serde(rename = "ifr")]
    Ifr,
    #[serde(rename = "mtn_obs")]
    MtnObs,
    #[serde(rename = "ice")]
    Ice,
    #[serde(rename = "fzlvl")]
    Fzlvl,
}

impl GAirmetHazard {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TurbHi => "turb-hi",
            Self::TurbLo => "turb-lo",
            Self::Llws => "llws",
            Self::SfcWind => "sfc_wind",
            Self::Ifr => "ifr",
            Self::MtnObs => "mtn_obs",
            Self::Ice => "ice",
            Self::Fzlvl => "fzlvl",
        }
    }
}

/// One G-AIRMET item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HazardAdvisoryRecord {
    #[serde(rename = "type", alias = "product", default, deserialize_with = "lenient_string")]
    pub advisory_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub hazard: Option<String>,

    #[serde(rename = "validTime", alias = "valid", default, deserialize_with = "lenient_string")]
    pub valid: Option<String>,

    #[serde(alias = "dueTo", default, deserialize_with = "lenient_string")]
    pub area: Option<String>,
}

impl HazardAdvisoryRecord {
    /// Decode an item, treating anything that is not a usable object as empty.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// The shapes a G-AIRMET response can take.
#[derive(Debug, Clone, PartialEq)]
pub enum GAirmetPayload {
    Empty,
    Text(String),
    Items(Vec<HazardAdvisoryRecord>),
    Other(Value),
}

impl From<Value> for GAirmetPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Items(
                items.iter().map(HazardAdvisoryRecord::from_value).collect(),
            ),
            other => Self::Other(other),
        }
    }
}

/// A composite briefing for a two-airport route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteBriefing {
    pub departure: String,
    pub destination: String,
    /// Approximate distance in nautical miles.
    pub distance_nm: f64,
    pub midpoint: (f64, f64),
    pub departure_metar: String,
    pub departure_taf: String,
    pub destination_metar: String,
    pub destination_taf: String,
    /// PIREP search radius around the midpoint, nautical miles.
    pub search_radius_nm: u32,
    pub enroute_pireps: String,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Accept a string or a number, rendering numbers as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept a runway list; any other shape reads as no runways.
fn lenient_runways<'de, D>(deserializer: D) -> Result<Option<Vec<RunwayEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().map(RunwayEntry::from).collect()),
        _ => None,
    })
}

/// Accept a number or a numeric string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_airport_record_from_api_shape() {
        let record: AirportRecord = serde_json::from_value(json!({
            "icaoId": "KJFK",
            "name": "NEW YORK/JOHN F KENNEDY INTL",
            "state": "NY",
            "country": "US",
            "lat": 40.6398,
            "lon": "-73.7789",
            "elev": 4,
            "runways": ["04L/22R", {"id": "13R/31L", "dimension": "14511x200", "surface": "C"}, 7]
        }))
        .unwrap();

        assert_eq!(record.identifier.as_deref(), Some("KJFK"));
        assert_eq!(record.city, None);
        assert_eq!(record.coordinates(), Some((40.6398, -73.7789)));
        assert_eq!(record.elevation, Some(4.0));

        let runways = record.runways.unwrap();
        assert_eq!(runways[0], RunwayEntry::Text("04L/22R".to_string()));
        assert!(matches!(runways[1], RunwayEntry::Record(_)));
        assert_eq!(runways[2], RunwayEntry::Other(json!(7)));
    }

    #[test]
    fn test_runway_dimensions_from_combined_field() {
        let record = RunwayRecord {
            dimension: Some("10000x150".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.dimensions(),
            (Some("10000".to_string()), Some("150".to_string()))
        );
    }

    #[test]
    fn test_gairmet_payload_variants() {
        assert_eq!(GAirmetPayload::from(Value::Null), GAirmetPayload::Empty);
        assert_eq!(
            GAirmetPayload::from(json!("text")),
            GAirmetPayload::Text("text".to_string())
        );
        assert!(matches!(
            GAirmetPayload::from(json!({"features": []})),
            GAirmetPayload::Other(_)
        ));

        match GAirmetPayload::from(json!([{"hazard": "IFR"}, 42])) {
            GAirmetPayload::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].hazard.as_deref(), Some("IFR"));
                assert_eq!(items[1], HazardAdvisoryRecord::default());
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_gairmet_params_use_api_spelling() {
        let hazard: GAirmetHazard = serde_json::from_value(json!("sfc_wind")).unwrap();
        assert_eq!(hazard, GAirmetHazard::SfcWind);
        assert_eq!(hazard.as_str(), "sfc_wind");

        let kind: GAirmetType = serde_json::from_value(json!("tango")).unwrap();
        assert_eq!(kind.as_str(), "tango");
        assert!(serde_json::from_value::<GAirmetType>(json!("alpha")).is_err());
    }
}
