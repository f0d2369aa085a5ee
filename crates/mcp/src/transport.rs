//! Transports: how a client's envelope reaches a peer.
//!
//! `HttpTransport` posts the envelope to a remote endpoint; `LocalTransport`
//! drives an in-process server directly, which is how embedding scenarios
//! and tests wire client to server without a network.

use crate::client::McpTransport;
use crate::protocol::{McpRequest, McpResponse};
use crate::server::McpServer;
use actuator_core::error::ProtocolError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Sends envelopes to a remote peer over HTTP POST.
pub struct HttpTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ProtocolError::Transport(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl McpTransport for HttpTransport {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, ProtocolError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProtocolError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProtocolError::Transport(format!("HTTP {status}: {body}")));
        }

        response
            .json::<McpResponse>()
            .await
            .map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
    }
}

/// Drives an in-process server directly.
pub struct LocalTransport {
    server: Arc<McpServer>,
}

impl LocalTransport {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl McpTransport for LocalTransport {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, ProtocolError> {
        Ok(self.server.handle(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::McpClient;
    use crate::protocol::PROTOCOL_VERSION;
    use actuator_core::action::ActionResult;
    use actuator_core::error::ToolError;
    use actuator_core::tool::{ParameterType, Tool, ToolParameter, ToolRegistry};
    use serde_json::{Map, Value, json};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the provided text back"
        }

        fn parameters(&self) -> Vec<ToolParameter> {
            vec![ToolParameter::required(
                "text",
                ParameterType::String,
                "Text to echo",
            )]
        }

        async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
            let text = arguments.get("text").and_then(|v| v.as_str()).unwrap_or("");
            Ok(ActionResult::success_result(json!(text)))
        }
    }

    fn local_client(server: McpServer) -> McpClient {
        McpClient::new().with_transport(Arc::new(LocalTransport::new(Arc::new(server))))
    }

    #[tokio::test]
    async fn initialize_round_trips_through_local_server() {
        let client = local_client(McpServer::new());
        let result = client.initialize().await.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "actuator");
    }

    #[tokio::test]
    async fn list_tools_round_trips_empty_registry() {
        let client = local_client(McpServer::new());
        let tools = client.list_tools().await.unwrap();
        assert!(tools.is_empty());
    }

    #[tokio::test]
    async fn call_tool_reaches_bound_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let server = McpServer::new().with_registry(Arc::new(registry));
        let client = local_client(server);

        let mut arguments = Map::new();
        arguments.insert("text".to_string(), json!("hi"));
        let result = client.call_tool("echo", arguments).await.unwrap();
        assert_eq!(result["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn peer_not_found_error_surfaces_through_client() {
        let client = local_client(McpServer::new());
        let err = client.read_resource("file:///x").await.unwrap_err();
        match err {
            ProtocolError::Rpc { code, message } => {
                assert_eq!(code, -32601);
                assert_eq!(message, "Method not found: resources/read");
            }
            other => panic!("Expected Rpc error, got {other:?}"),
        }
    }
}
