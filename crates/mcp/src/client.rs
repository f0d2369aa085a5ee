//! Protocol client: correlated requests through an injected transport.
//!
//! The client owns nothing but an id counter and a transport handle. Each
//! convenience wrapper builds a request with a fixed method string, sends
//! it, and drills into the response's result payload.

use crate::protocol::{McpRequest, McpResource, McpResponse, McpToolSpec, PROTOCOL_VERSION};
use actuator_core::error::ProtocolError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Transport seam between client and peer.
#[async_trait]
pub trait McpTransport: Send + Sync {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, ProtocolError>;
}

/// Name reported to the peer during `initialize`.
const CLIENT_NAME: &str = "actuator";

/// A protocol client with per-instance id allocation.
///
/// Two concurrent runs must use separate clients to keep id monotonicity
/// meaningful.
pub struct McpClient {
    transport: Option<Arc<dyn McpTransport>>,
    request_id_counter: AtomicU64,
}

impl McpClient {
    pub fn new() -> Self {
        Self {
            transport: None,
            request_id_counter: AtomicU64::new(0),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn McpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Ids are the strings "1", "2", "3", … in allocation order.
    fn next_id(&self) -> String {
        (self.request_id_counter.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    /// Send one correlated request and return the peer's result payload.
    ///
    /// A peer-reported error surfaces as [`ProtocolError::Rpc`] carrying its
    /// code and message.
    pub async fn request(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<Value, ProtocolError> {
        let transport = self.transport.as_ref().ok_or(ProtocolError::NotConfigured)?;
        let request = McpRequest::new(method).with_id(self.next_id()).with_params(params);
        debug!(method, id = request.id.as_deref().unwrap_or(""), "Sending protocol request");
        let response = transport.send(request).await?;
        if let Some(error) = response.error {
            return Err(ProtocolError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Negotiate the session with the peer.
    pub async fn initialize(&self) -> Result<Value, ProtocolError> {
        let mut params = Map::new();
        params.insert("protocolVersion".to_string(), json!(PROTOCOL_VERSION));
        params.insert("capabilities".to_string(), json!({}));
        params.insert(
            "clientInfo".to_string(),
            json!({"name": CLIENT_NAME, "version": env!("CARGO_PKG_VERSION")}),
        );
        self.request("initialize", params).await
    }

    pub async fn list_resources(&self) -> Result<Vec<McpResource>, ProtocolError> {
        let result = self.request("resources/list", Map::new()).await?;
        parse_list(&result, "resources")
    }

    pub async fn read_resource(&self, uri: &str) -> Result<Value, ProtocolError> {
        let mut params = Map::new();
        params.insert("uri".to_string(), json!(uri));
        self.request("resources/read", params).await
    }

    pub async fn list_tools(&self) -> Result<Vec<McpToolSpec>, ProtocolError> {
        let result = self.request("tools/list", Map::new()).await?;
        parse_list(&result, "tools")
    }

    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, ProtocolError> {
        let mut params = Map::new();
        params.insert("name".to_string(), json!(name));
        params.insert("arguments".to_string(), Value::Object(arguments));
        self.request("tools/call", params).await
    }
}

impl Default for McpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Missing key means an empty list; a present key must parse.
fn parse_list<T: DeserializeOwned>(result: &Value, key: &str) -> Result<Vec<T>, ProtocolError> {
    let Some(items) = result.get(key) else {
        return Ok(Vec::new());
    };
    serde_json::from_value(items.clone())
        .map_err(|e| ProtocolError::MalformedResponse(format!("bad '{key}' list: {e}")))
}
