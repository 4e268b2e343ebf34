// crates/aiact-mcp/src/rpc.rs
// ============================================================================
// Module: JSON-RPC Types
// Description: JSON-RPC 2.0 request, response, and error records.
// Purpose: Keep the wire shape and error codes in one place.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Standard JSON-RPC 2.0 shapes with the error codes this server emits.
//! Responses always echo the request id when one was readable; parse
//! failures respond with a null id.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Parse error: the payload was not valid JSON.
pub const PARSE_ERROR: i64 = -32700;

/// Invalid request: not a well-formed JSON-RPC 2.0 request.
pub const INVALID_REQUEST: i64 = -32600;

/// Method not found.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Invalid params, including unknown tool and resource names.
pub const INVALID_PARAMS: i64 = -32602;

/// Internal error while producing a response.
pub const INTERNAL_ERROR: i64 = -32603;

/// Tool execution failure.
pub const TOOL_ERROR: i64 = -32000;

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version; must be "2.0".
    pub jsonrpc: String,
    /// Request identifier echoed in the response.
    #[serde(default)]
    pub id: Value,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Structured error detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC 2.0 response.
///
/// # Invariants
/// - Exactly one of `result` and `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version; always "2.0".
    pub jsonrpc: String,
    /// Request identifier, or null when unreadable.
    pub id: Value,
    /// Successful result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a success response.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    #[must_use]
    pub fn failure(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }
}
