//! Weather API client.
//!
//! `WeatherSource` is the seam tools depend on. `AviationWeatherClient` is
//! the production implementation over a single shared `reqwest::Client`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::endpoint::Endpoint;
use super::error::{ApiError, ApiResult};
use super::query::QueryParams;
use crate::core::config::UpstreamConfig;

/// Structured response flavours offered by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// Plain JSON records.
    Json,
    /// Decoded JSON, used by the G-AIRMET endpoint.
    Decoded,
}

impl JsonFormat {
    fn as_param(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Decoded => "decoded",
        }
    }
}

/// Source of upstream weather data.
///
/// Text and structured responses are separate operations so a caller always
/// knows which shape it gets back.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch a raw text product. `format=raw` is always sent.
    async fn fetch_text(&self, endpoint: Endpoint, params: QueryParams) -> ApiResult<String>;

    /// Fetch a structured product.
    ///
    /// A blank body yields `Value::Null`. A body that is not valid JSON is
    /// returned as `Value::String` so callers can pass it through as text.
    async fn fetch_json(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        format: JsonFormat,
    ) -> ApiResult<Value>;
}

/// Client for the aviation weather data API.
#[derive(Debug, Clone)]
pub struct AviationWeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl AviationWeatherClient {
    /// Build the client once at startup.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full request URL for an endpoint.
    pub fn url_for(&self, endpoint: Endpoint, params: &QueryParams) -> ApiResult<String> {
        let mut url = format!("{}/{}", self.base_url, endpoint.path());
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.to_query_string()?);
        }
        Ok(url)
    }

    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn get(&self, endpoint: Endpoint, params: &QueryParams) -> ApiResult<String> {
        let url = self.url_for(endpoint, params)?;
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            error!("Request to {} failed: {:?}", url, e);
            ApiError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to {} returned HTTP {}", url, status);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            error!("Failed to read body from {}: {:?}", url, e);
            ApiError::transport(e.to_string())
        })
    }
}

#[async_trait]
impl WeatherSource for AviationWeatherClient {
    async fn fetch_text(&self, endpoint: Endpoint, mut params: QueryParams) -> ApiResult<String> {
        params.set("format", "raw");
        self.get(endpoint, &params).await
    }

    async fn fetch_json(
        &self,
        endpoint: Endpoint,
        mut params: QueryParams,
        format: JsonFormat,
    ) -> ApiResult<Value> {
        params.set("format", format.as_param());
        let body = self.get(endpoint, &params).await?;
        Ok(parse_structured(&body))
    }
}

/// Interpret a structured response body.
pub(crate) fn parse_structured(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
