//! Query parameters for upstream requests.

use serde::Serialize;

use super::error::{ApiError, ApiResult};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl ParamValue {
    /// Render the value as it appears in the query string.
    ///
    /// Whole numbers are written without a fractional part.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Query parameters for one request.
///
/// Absent values are dropped at insertion time, so everything stored here
/// is transmitted. Setting a name twice replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Add a parameter only when a value is present.
    pub fn with_opt<V: Into<ParamValue>>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` query string.
    pub fn to_query_string(&self) -> ApiResult<String> {
        let pairs: Vec<(&str, String)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.render()))
            .collect();
        encode(&pairs)
    }
}

fn encode<T: Serialize>(pairs: &T) -> ApiResult<String> {
    serde_urlencoded::to_string(pairs)
        .map_err(|e| ApiError::unexpected_shape(format!("could not encode query: {}", e)))
}
