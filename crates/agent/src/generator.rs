//! Action generation: translating a provider response into typed actions.
//!
//! The policy is ordered. A structured call from the backend always wins;
//! failing that, content that looks like a JSON action envelope is parsed
//! directly; failing that, plain content becomes a `Generate` echo. An
//! empty response yields no actions, which the control loop treats as
//! task completion.

use actuator_core::action::Action;
use actuator_core::provider::GenerationResponse;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Converts provider responses into zero or more [`Action`]s.
///
/// Stateless; one instance can serve any number of runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionGenerator;

impl ActionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Translate one response into this iteration's ordered action list.
    pub fn generate(&self, response: &GenerationResponse) -> Vec<Action> {
        if let Some(call) = &response.structured_call {
            debug!(tool = %call.name, "Structured call from provider");
            return vec![Action::tool_call(&call.name, parse_arguments(&call.arguments))];
        }

        let content = response.content.trim();
        if content.is_empty() {
            return Vec::new();
        }

        if content.starts_with('{') || content.starts_with('[') {
            if let Ok(value) = serde_json::from_str::<Value>(content) {
                let actions = actions_from_value(value);
                if !actions.is_empty() {
                    return actions;
                }
            }
        }

        vec![Action::generate(&response.content)]
    }
}

/// Parse a raw argument payload into a parameter map.
///
/// Malformed or non-object payloads recover silently as an empty map; the
/// capability's own argument validation reports anything missing.
fn parse_arguments(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            trace!(payload = %other, "Non-object call arguments, ignoring");
            Map::new()
        }
        Err(e) => {
            trace!(error = %e, "Unparseable call arguments, ignoring");
            Map::new()
        }
    }
}

/// Convert a parsed JSON envelope into actions.
///
/// An object carrying a `type` tag converts to a single action; an array
/// converts element-wise, dropping elements that do not describe an
/// action. Anything else (or nothing convertible) returns an empty list
/// so the caller can fall back to the plain-content path.
fn actions_from_value(value: Value) -> Vec<Action> {
    match value {
        Value::Object(map) if map.contains_key("type") => {
            serde_json::from_value(Value::Object(map))
                .map(|action| vec![action])
                .unwrap_or_default()
        }
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
