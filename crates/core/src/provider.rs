//! GenerationProvider trait — the abstraction over generation backends.
//!
//! A provider takes a prompt, a system prompt, and the available tool
//! definitions, and returns generated content plus an optional structured
//! tool call. The control loop calls it without knowing which backend is
//! behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// One generation request from the control loop.
///
/// Model, temperature, and token limits are provider construction state,
/// not request state: a provider is configured once and asked many times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The driving prompt: the task text on the first iteration, the
    /// rendered context window afterwards.
    pub prompt: String,

    /// Fixed instructions describing the agent and its capabilities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Available tools the model can call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,

    /// How the model may use tools.
    #[serde(default)]
    pub tool_choice: ToolChoice,
}

/// Tool-use policy for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides whether to call a tool.
    #[default]
    Auto,
    /// Tool calls are disabled.
    None,
    /// The model must call the named tool.
    Named(String),
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A structured call descriptor returned by the backend.
///
/// `arguments` is the backend's raw argument payload, a JSON-encoded
/// string. Parsing it (and recovering from malformed payloads) is the
/// action generator's job, not the provider's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredCall {
    pub name: String,
    pub arguments: String,
}

/// A complete (non-streaming) response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated free-text content (may be empty).
    pub content: String,

    /// The first structured tool call, when the backend issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_call: Option<StructuredCall>,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Why generation stopped, as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    /// Provider-specific metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A single chunk in a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationChunk {
    /// Partial content delta
    #[serde(default)]
    pub content: Option<String>,

    /// Completed structured calls (assembled from deltas, final chunk only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<StructuredCall>,

    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,

    /// Usage info (typically only in the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// The core GenerationProvider trait.
///
/// Every backend (OpenAI-compatible endpoints, Gemini's compatibility
/// surface, custom base URLs) implements this. Calls may fail; the control
/// loop converts failures into fail-stop iteration records.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError>;

    /// Send a request and get a stream of response chunks.
    ///
    /// Default implementation calls `generate()` and wraps the result as a
    /// single chunk.
    async fn stream(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<GenerationChunk, ProviderError>>,
        ProviderError,
    > {
        let response = self.generate(request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx
            .send(Ok(GenerationChunk {
                content: Some(response.content),
                calls: response.structured_call.into_iter().collect(),
                done: true,
                usage: response.usage,
            }))
            .await;
        Ok(rx)
    }

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
