//! Action dispatch: one uniform entry point for every action type.
//!
//! The executor never returns an error and never panics. Every failure
//! (unknown capability, handler fault, missing protocol transport, a
//! timed-out invocation) comes back as an unsuccessful [`ActionResult`]
//! for the control loop to fold into context.

use std::sync::Arc;
use std::time::Duration;

use actuator_core::action::{Action, ActionResult, ActionType};
use actuator_core::error::{ProtocolError, ToolError};
use actuator_core::tool::ToolRegistry;
use actuator_mcp::McpClient;
use serde_json::Value;
use tracing::{debug, warn};

/// Dispatches actions to the capability registry, the protocol client,
/// or the built-in control handlers.
pub struct ActionExecutor {
    registry: Arc<ToolRegistry>,
    protocol: Option<Arc<McpClient>>,
    tool_timeout: Option<Duration>,
}

impl ActionExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            protocol: None,
            tool_timeout: None,
        }
    }

    /// Attach a protocol client for `ProtocolRequest` actions.
    pub fn with_protocol_client(mut self, client: Arc<McpClient>) -> Self {
        self.protocol = Some(client);
        self
    }

    /// Bound each capability invocation to `timeout`. Unset means unbounded.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    /// Execute one action and return its uniform result.
    pub async fn execute(&self, action: &Action) -> ActionResult {
        debug!(kind = ?action.action_type, name = %action.name, "Dispatching action");
        match action.action_type {
            ActionType::ToolCall => self.invoke_tool(action).await,
            ActionType::ProtocolRequest => self.protocol_request(action).await,
            // The text already exists; this action just carries it through
            // the result channel.
            ActionType::Generate => ActionResult::success_result(
                action.parameters.get("content").cloned().unwrap_or(Value::Null),
            ),
            ActionType::Conditional | ActionType::Loop => self.run_nested(action).await,
            ActionType::Finish => {
                ActionResult::success_result(Value::Object(action.parameters.clone()))
            }
        }
    }

    async fn invoke_tool(&self, action: &Action) -> ActionResult {
        let invocation = self.registry.invoke(&action.name, &action.parameters);
        let Some(limit) = self.tool_timeout else {
            return invocation.await;
        };
        match tokio::time::timeout(limit, invocation).await {
            Ok(result) => result,
            Err(_) => {
                warn!(tool = %action.name, timeout_secs = limit.as_secs(), "Tool timed out");
                ActionResult::error_result(
                    ToolError::Timeout {
                        tool_name: action.name.clone(),
                        timeout_secs: limit.as_secs(),
                    }
                    .to_string(),
                )
            }
        }
    }

    async fn protocol_request(&self, action: &Action) -> ActionResult {
        let Some(client) = &self.protocol else {
            return ActionResult::error_result(ProtocolError::NotConfigured.to_string());
        };
        match client.request(&action.name, action.parameters.clone()).await {
            Ok(result) => ActionResult::success_result(result),
            Err(e) => ActionResult::error_result(e.to_string()),
        }
    }

    /// Run a nested `actions` array in order and fold the outcomes.
    ///
    /// Missing or non-array nesting is a no-op success.
    async fn run_nested(&self, action: &Action) -> ActionResult {
        let Some(nested) = action.parameters.get("actions").and_then(Value::as_array) else {
            return ActionResult::success_result(Value::Null);
        };

        let mut outcomes = Vec::with_capacity(nested.len());
        for value in nested {
            let nested_action: Action = match serde_json::from_value(value.clone()) {
                Ok(parsed) => parsed,
                Err(e) => {
                    outcomes.push(serde_json::to_value(ActionResult::error_result(format!(
                        "Malformed nested action: {e}"
                    )))
                    .unwrap_or(Value::Null));
                    continue;
                }
            };
            let result = Box::pin(self.execute(&nested_action)).await;
            outcomes.push(serde_json::to_value(result).unwrap_or(Value::Null));
        }
        ActionResult::success_result(Value::Array(outcomes))
    }
}
