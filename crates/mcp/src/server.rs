//! Protocol server: dispatches envelope requests against local state.
//!
//! The server owns ordered resource/tool descriptor lists and an optional
//! capability registry binding for `tools/call`. Every response mirrors the
//! request's id; unknown methods get the fixed not-found code.

use crate::protocol::{
    INTERNAL_ERROR, METHOD_NOT_FOUND, McpRequest, McpResource, McpResponse, McpToolSpec,
    PROTOCOL_VERSION,
};
use actuator_core::tool::ToolRegistry;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::debug;

/// Name reported to peers during `initialize`.
const SERVER_NAME: &str = "actuator";

/// An in-process protocol server.
#[derive(Default)]
pub struct McpServer {
    registry: Option<Arc<ToolRegistry>>,
    resources: Vec<McpResource>,
    tools: Vec<McpToolSpec>,
}

impl McpServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the capability registry `tools/call` dispatches against.
    pub fn with_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Append a resource descriptor. Duplicates are kept as given.
    pub fn register_resource(&mut self, resource: McpResource) {
        self.resources.push(resource);
    }

    /// Append a tool descriptor. Duplicates are kept as given.
    pub fn register_tool(&mut self, tool: McpToolSpec) {
        self.tools.push(tool);
    }

    /// Handle one request and produce the mirrored response.
    pub async fn handle(&self, request: McpRequest) -> McpResponse {
        let McpRequest {
            id, method, params, ..
        } = request;
        debug!(method = %method, id = id.as_deref().unwrap_or(""), "Handling protocol request");
        match method.as_str() {
            "initialize" => McpResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"resources": {}, "tools": {}},
                    "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
                }),
            ),
            "resources/list" => McpResponse::success(id, json!({"resources": self.resources})),
            "tools/list" => McpResponse::success(id, json!({"tools": self.tools})),
            "tools/call" => self.handle_tool_call(id, &params).await,
            other => McpResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        }
    }

    async fn handle_tool_call(&self, id: Option<String>, params: &Map<String, Value>) -> McpResponse {
        let Some(registry) = &self.registry else {
            return McpResponse::error(id, INTERNAL_ERROR, "Tool registry not available");
        };
        let name = params.get("name").and_then(|v| v.as_str()).unwrap_or_default();
        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let result = registry.invoke(name, &arguments).await;
        if result.success {
            McpResponse::success(
                id,
                json!({"content": [{"type": "text", "text": result.result_text()}]}),
            )
        } else {
            let message = result
                .error
                .unwrap_or_else(|| "Tool execution failed".to_string());
            McpResponse::error(id, INTERNAL_ERROR, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuator_core::action::ActionResult;
    use actuator_core::error::ToolError;
    use actuator_core::tool::{ParameterType, Tool, ToolParameter};
    use async_trait::async_trait;

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

    fn request(method: &str, params: Value) -> McpRequest {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        McpRequest::new(method).with_id("9").with_params(params)
    }

    #[tokio::test]
    async fn initialize_reports_capabilities_and_server_info() {
        let server = McpServer::new();
        let response = server.handle(request("initialize", json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["capabilities"]["resources"], json!({}));
        assert_eq!(result["capabilities"]["tools"], json!({}));
        assert_eq!(result["serverInfo"]["name"], "actuator");
        assert_eq!(response.id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn tools_list_is_empty_before_registration() {
        let server = McpServer::new();
        let response = server.handle(request("tools/list", json!({}))).await;
        assert_eq!(response.result.unwrap(), json!({"tools": []}));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn registered_descriptors_are_listed_with_duplicates() {
        let mut server = McpServer::new();
        let spec = McpToolSpec {
            name: "echo".into(),
            description: "Echo".into(),
            input_schema: json!({}),
        };
        server.register_tool(spec.clone());
        server.register_tool(spec);
        server.register_resource(McpResource {
            uri: "file:///README.md".into(),
            name: "readme".into(),
            description: None,
            mime_type: Some("text/markdown".into()),
        });

        let response = server.handle(request("tools/list", json!({}))).await;
        assert_eq!(response.result.unwrap()["tools"].as_array().unwrap().len(), 2);

        let response = server.handle(request("resources/list", json!({}))).await;
        let resources = response.result.unwrap();
        assert_eq!(resources["resources"][0]["uri"], "file:///README.md");
        assert_eq!(resources["resources"][0]["mimeType"], "text/markdown");
    }

    #[tokio::test]
    async fn unknown_method_gets_not_found_code() {
        let server = McpServer::new();
        let response = server.handle(request("resources/read", json!({"uri": "x"}))).await;
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: resources/read");
        assert_eq!(response.id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn tool_call_without_registry_is_internal_error() {
        let server = McpServer::new();
        let response = server
            .handle(request("tools/call", json!({"name": "echo", "arguments": {}})))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.message, "Tool registry not available");
    }

    #[tokio::test]
    async fn tool_call_returns_text_content_block() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        let server = McpServer::new().with_registry(Arc::new(registry));

        let response = server
            .handle(request(
                "tools/call",
                json!({"name": "echo", "arguments": {"text": "hi"}}),
            ))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn tool_call_on_unknown_tool_propagates_registry_error() {
        let server = McpServer::new().with_registry(Arc::new(ToolRegistry::new()));
        let response = server
            .handle(request("tools/call", json!({"name": "frobnicate"})))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.message, "Tool 'frobnicate' not found");
    }
}
