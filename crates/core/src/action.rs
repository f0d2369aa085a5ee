//! Action model: the typed representation of "what to do next" and
//! "what happened".
//!
//! Actions are created fresh each iteration by the generator, consumed
//! immediately by the executor, and never mutated after creation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of step an [`Action`] describes.
///
/// Wire tags are stable; `Generate` and `ProtocolRequest` keep their
/// historical tags (`llm_generate`, `mcp_request`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Invoke a named capability from the registry.
    ToolCall,
    /// Echo generated content through the result channel.
    #[serde(rename = "llm_generate")]
    Generate,
    /// Send a request to a remote protocol peer.
    #[serde(rename = "mcp_request")]
    ProtocolRequest,
    /// Execute a nested action list.
    Conditional,
    /// Execute a nested action list.
    Loop,
    /// Terminal signal: the run stops once this executes.
    Finish,
}

/// One step the control loop should perform next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub name: String,
    /// Arguments for the step, in insertion order.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Action {
    /// A capability invocation.
    pub fn tool_call(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        let name = name.into();
        Self {
            action_type: ActionType::ToolCall,
            description: Some(format!("Call tool: {name}")),
            name,
            parameters,
            metadata: Map::new(),
        }
    }

    /// A content echo carrying the generation service's free-text output.
    pub fn generate(content: impl Into<String>) -> Self {
        let mut parameters = Map::new();
        parameters.insert("content".to_string(), Value::String(content.into()));
        Self {
            action_type: ActionType::Generate,
            name: "generate".to_string(),
            parameters,
            description: Some("LLM generated content".to_string()),
            metadata: Map::new(),
        }
    }

    /// A request to a remote protocol peer; `method` doubles as the name.
    pub fn protocol_request(method: impl Into<String>, parameters: Map<String, Value>) -> Self {
        let method = method.into();
        Self {
            action_type: ActionType::ProtocolRequest,
            description: Some(format!("MCP request: {method}")),
            name: method,
            parameters,
            metadata: Map::new(),
        }
    }

    /// The terminal action.
    pub fn finish(parameters: Map<String, Value>) -> Self {
        Self {
            action_type: ActionType::Finish,
            name: "finish".to_string(),
            parameters,
            description: None,
            metadata: Map::new(),
        }
    }
}

/// The structured outcome of executing one [`Action`].
///
/// Exactly one of `result`/`error` is meaningful, gated by `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ActionResult {
    pub fn success_result(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            metadata: Map::new(),
        }
    }

    pub fn error_result(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            metadata: Map::new(),
        }
    }

    /// Plain-text rendering of the result payload.
    ///
    /// Strings render unquoted, other values as compact JSON, and an absent
    /// or null result as `None`. Shared by the loop's result summaries and
    /// the protocol server's text content blocks.
    pub fn result_text(&self) -> String {
        match &self.result {
            None | Some(Value::Null) => "None".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
