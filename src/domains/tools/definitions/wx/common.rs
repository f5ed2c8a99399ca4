//! Common utilities shared across the aviation weather tools.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use super::format::non_blank;
use crate::domains::tools::ToolError;

/// Default PIREP search radius around an airport, in miles.
pub fn default_radius() -> u32 {
    50
}

/// Normalise an airport identifier: trimmed, upper case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Trimmed text, or the given fallback when the body is blank.
pub fn text_or(body: &str, fallback: impl FnOnce() -> String) -> String {
    non_blank(body).map(str::to_string).unwrap_or_else(fallback)
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Turn a handler outcome into a tool result, prefixing failures with the
/// operation they came from.
pub fn into_result(outcome: Result<String, ToolError>, context: &str) -> CallToolResult {
    match outcome {
        Ok(text) => success_result(text),
        Err(e) => error_result(&format!("Error fetching {}: {}", context, e)),
    }
}

/// Serialise a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}
