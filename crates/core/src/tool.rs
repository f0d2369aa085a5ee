//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world:
//! read/write files, search code, list directories, etc. Each tool
//! declares its parameters once; schemas and generation-service
//! definitions are derived from that declaration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tracing::warn;
use crate::action::ActionResult;
use crate::error::ToolError;
use crate::provider::ToolDefinition;

/// JSON type tag for a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
            ParameterType::Object => "object",
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParameterType,

    pub description: String,

    #[serde(default = "default_required")]
    pub required: bool,

    /// Default value, surfaced in the schema only when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_required() -> bool {
    true
}

impl ToolParameter {
    pub fn required(
        name: impl Into<String>,
        kind: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        kind: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// The core Tool trait.
///
/// `execute` returns `Err` only for handler-level faults: missing or
/// mistyped arguments, an I/O layer giving out mid-operation. Failures a
/// tool detects on purpose (a file that does not exist, an ambiguous edit)
/// come back as unsuccessful [`ActionResult`]s and flow to the caller as
/// ordinary information.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "read_file", "search_code").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// The declared parameters, in schema order.
    fn parameters(&self) -> Vec<ToolParameter>;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError>;

    /// Full schema: name, description, and a JSON-schema object for the
    /// parameters.
    fn schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.parameters() {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.kind.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = param.default {
                prop.insert("default".to_string(), default);
            }
            properties.insert(param.name.clone(), Value::Object(prop));
            if param.required {
                required.push(Value::String(param.name));
            }
        }
        json!({
            "name": self.name(),
            "description": self.description(),
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        let schema = self.schema();
        let parameters = schema
            .get("parameters")
            .cloned()
            .unwrap_or_else(|| json!({"type": "object", "properties": {}}));
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters,
        }
    }
}

/// A registry of available tools.
///
/// The control loop uses this to:
/// 1. Get tool schemas/definitions to send to the generation service
/// 2. Look up and invoke tools when an action requests them
///
/// Listing order is registration order. Registering a name twice replaces
/// the handler in place and keeps the original position.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "Replacing registered tool");
        } else {
            self.order.push(name);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.ordered().map(|t| t.name()).collect()
    }

    /// Full schemas, in registration order.
    pub fn schemas(&self) -> Vec<Value> {
        self.ordered().map(|t| t.schema()).collect()
    }

    /// Get all tool definitions (for sending to the LLM).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.ordered().map(|t| t.to_definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Invoke a tool by name. Never raises: an unknown name or a handler
    /// fault comes back as an unsuccessful result.
    pub async fn invoke(&self, name: &str, arguments: &Map<String, Value>) -> ActionResult {
        let Some(tool) = self.get(name) else {
            return ActionResult::error_result(ToolError::NotFound(name.to_string()).to_string());
        };
        match tool.execute(arguments).await {
            Ok(result) => result,
            Err(e) => ActionResult::error_result(format!("Tool execution failed: {e}")),
        }
    }

    fn ordered(&self) -> impl Iterator<Item = &dyn Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).map(|t| t.as_ref()))
    }
}
