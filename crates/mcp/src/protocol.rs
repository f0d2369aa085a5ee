//! JSON-RPC envelope types for the capability protocol.
//!
//! Requests and responses correlate by a stringified id; error codes follow
//! the JSON-RPC convention the peer expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol revision exchanged during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Peer error code for an unrecognized method.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Peer error code for an internal failure while handling a method.
pub const INTERNAL_ERROR: i32 = -32603;

/// One protocol request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,

    /// Correlation id; notifications carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub method: String,

    #[serde(default)]
    pub params: Map<String, Value>,
}

fn default_jsonrpc() -> String {
    "2.0".to_string()
}

impl McpRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: None,
            method: method.into(),
            params: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }
}

/// One protocol response, mirroring the request's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl McpResponse {
    pub fn success(id: Option<String>, result: Value) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// A peer-reported error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// A resource a protocol server exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResource {
    pub uri: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// A tool a protocol server exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolSpec {
    pub name: String,

    pub description: String,

    #[serde(default = "empty_object", rename = "inputSchema")]
    pub input_schema: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
