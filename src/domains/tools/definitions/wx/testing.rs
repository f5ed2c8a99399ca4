//! In-memory `WeatherSource` for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::domains::upstream::{ApiError, ApiResult, Endpoint, JsonFormat, QueryParams, WeatherSource};

type Responder = Box<dyn Fn(Endpoint, &QueryParams) -> ApiResult<Value> + Send + Sync>;

/// A request seen by the fake: endpoint plus encoded query string.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub endpoint: Endpoint,
    pub query: String,
}

/// Fake weather source answering from a closure and recording every call.
///
/// Text fetches expect the closure to return a JSON string.
pub struct FakeSource {
    respond: Responder,
    seen: Mutex<Vec<Seen>>,
}

impl FakeSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(Endpoint, &QueryParams) -> ApiResult<Value> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Every endpoint answers with the same value.
    pub fn always(value: Value) -> Self {
        Self::new(move |_, _| Ok(value.clone()))
    }

    /// Every endpoint fails with the same error.
    pub fn failing(error: ApiError) -> Self {
        Self::new(move |_, _| Err(error.clone()))
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, endpoint: Endpoint, params: &QueryParams) {
        self.seen.lock().unwrap().push(Seen {
            endpoint,
            query: params.to_query_string().unwrap(),
        });
    }
}

#[async_trait]
impl WeatherSource for FakeSource {
    async fn fetch_text(&self, endpoint: Endpoint, mut params: QueryParams) -> ApiResult<String> {
        params.set("format", "raw");
        self.record(endpoint, &params);
        match (self.respond)(endpoint, &params)? {
            Value::String(text) => Ok(text),
            Value::Null => Ok(String::new()),
            other => Err(ApiError::unexpected_shape(other.to_string())),
        }
    }

    async fn fetch_json(
        &self,
        endpoint: Endpoint,
        mut params: QueryParams,
        format: JsonFormat,
    ) -> ApiResult<Value> {
        let format = match format {
            JsonFormat::Json => "json",
            JsonFormat::Decoded => "decoded",
        };
        params.set("format", format);
        self.record(endpoint, &params);
        (self.respond)(endpoint, &params)
    }
}

/// Text of the first content block of a tool result.
pub fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

/// The `ids` parameter of a request, if any.
pub fn ids(params: &QueryParams) -> Option<String> {
    params.get("ids").map(|v| v.render())
}
