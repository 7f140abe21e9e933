//! Common utilities shared across DigitalOcean tools.
//!
//! Parameter decoding, pagination and result formatting helpers.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Maximum page size accepted by the DigitalOcean API.
const MAX_PER_PAGE: u32 = 200;

/// Decode tool arguments into a parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Default page number.
pub fn default_page() -> u32 {
    1
}

/// Default page size.
pub fn default_per_page() -> u32 {
    20
}

/// Clamp a page number to at least 1.
pub fn validate_page(page: u32) -> u32 {
    page.max(1)
}

/// Clamp a page size to the allowed range (1-200).
pub fn validate_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}

/// Query parameters for a paginated list request.
pub fn page_query(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", validate_page(page).to_string()),
        ("per_page", validate_per_page(per_page).to_string()),
    ]
}

/// Total item count reported in a list response's `meta` object.
pub fn total_count(body: &Value) -> Option<u64> {
    body.get("meta")
        .and_then(|meta| meta.get("total"))
        .and_then(Value::as_u64)
}

/// Pull a named field out of an API response body.
pub fn extract(body: Value, field: &str) -> Result<Value, ToolError> {
    match body {
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| ToolError::unexpected_response(format!("missing '{}' field", field))),
        _ => Err(ToolError::unexpected_response("response is not a JSON object")),
    }
}

/// Create a success result with pretty-printed JSON as text and structured content.
pub fn json_result(value: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    let mut result = CallToolResult::success(vec![Content::text(text)]);
    if value.is_object() {
        result.structured_content = Some(value);
    }
    result
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Turn a tool outcome into the result sent to the client.
pub fn into_call_result(outcome: Result<Value, ToolError>) -> CallToolResult {
    match outcome {
        Ok(value) => json_result(value),
        Err(e) => error_result(&e.to_string()),
    }
}
