//! HTTP transport.
//!
//! Stateless JSON-RPC 2.0 over POST. Each request is answered on its own;
//! there is no session to initialize, so `curl` is enough to call a tool:
//!
//! ```text
//! curl -s localhost:8080/mcp -d '{"jsonrpc":"2.0","id":1,"method":"tools/call",
//!   "params":{"name":"get_metar","arguments":{"airport_code":"KJFK"}}}'
//! ```

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const PROTOCOL_VERSION: &str = "2024-11-05";

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Incoming JSON-RPC message. A missing `id` marks a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn reply(id: Option<Value>, outcome: Result<Value, RpcError>) -> Self {
        let id = id.unwrap_or(Value::Null);
        match outcome {
            Ok(result) => Self {
                jsonrpc: "2.0",
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(error),
            },
        }
    }
}

fn rpc_error(code: i32, message: impl Into<String>) -> RpcError {
    RpcError {
        code,
        message: message.into(),
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - JSON-RPC on POST http://{}{} (CORS {})",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "server": server.name(),
        "version": server.version(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(State(server): State<McpServer>, Json(request): Json<RpcRequest>) -> Response {
    match dispatch(&server, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Route one JSON-RPC message. Notifications produce no response.
pub async fn dispatch(server: &McpServer, request: RpcRequest) -> Option<RpcResponse> {
    if request.id.is_none() && request.method.starts_with("notifications/") {
        debug!("Notification: {}", request.method);
        return None;
    }

    let outcome = if request.jsonrpc != "2.0" {
        Err(rpc_error(INVALID_REQUEST, "Invalid Request"))
    } else {
        match request.method.as_str() {
            "initialize" => Ok(initialize(server)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": server.list_tools() })),
            "tools/call" => call_tool(server, &request.params).await,
            other => {
                warn!("Unknown method: {}", other);
                Err(rpc_error(METHOD_NOT_FOUND, "Method not found"))
            }
        }
    };

    Some(RpcResponse::reply(request.id, outcome))
}

fn initialize(server: &McpServer) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": server.instructions()
    })
}

async fn call_tool(server: &McpServer, params: &Value) -> Result<Value, RpcError> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| rpc_error(INVALID_PARAMS, "Missing tool name"))?;
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    info!("tools/call {}", name);
    server
        .call_tool(name, arguments)
        .await
        .map_err(|e| rpc_error(INVALID_PARAMS, e))
}
