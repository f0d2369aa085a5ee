//! OpenAI-compatible provider implementation.
//!
//! Works with: OpenAI, Gemini (via Google's OpenAI compatibility endpoint),
//! and any custom OpenAI-compatible base URL.
//!
//! Supports:
//! - Chat completions (non-streaming and streaming SSE)
//! - Tool use / function calling
//! - Health checks

use async_trait::async_trait;
use futures::StreamExt;
use actuator_core::error::ProviderError;
use actuator_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// An OpenAI-compatible LLM provider.
///
/// This handles both supported backends since Gemini exposes an
/// OpenAI-compatible `/chat/completions` endpoint, and custom base URLs
/// are expected to do the same.
///
/// Model, temperature, and token limit are construction state: the control
/// loop sends prompts, not sampling parameters.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 2000,
            client,
        }
    }

    /// Create an OpenAI provider (convenience constructor).
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key, model)
    }

    /// Create a Gemini provider via Google's OpenAI compatibility surface
    /// (convenience constructor).
    pub fn gemini(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(
            "gemini",
            "https://generativelanguage.googleapis.com/v1beta/openai",
            api_key,
            model,
        )
    }

    /// Set the sampling temperature (builder-style).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit (builder-style).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Convert a generation request to OpenAI chat message format.
    fn to_api_messages(request: &GenerationRequest) -> Vec<ApiMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ApiMessage {
                role: "system".into(),
                content: Some(system.clone()),
                tool_calls: None,
            });
        }
        messages.push(ApiMessage {
            role: "user".into(),
            content: Some(request.prompt.clone()),
            tool_calls: None,
        });
        messages
    }

    /// Convert tool definitions to OpenAI API format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<ApiToolDefinition> {
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                r#type: "function".into(),
                function: ApiToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    /// Convert a tool-use policy to the wire `tool_choice` value.
    fn to_api_tool_choice(choice: &ToolChoice) -> serde_json::Value {
        match choice {
            ToolChoice::Auto => serde_json::json!("auto"),
            ToolChoice::None => serde_json::json!("none"),
            ToolChoice::Named(name) => serde_json::json!({
                "type": "function",
                "function": { "name": name },
            }),
        }
    }

    /// Map a parsed chat completion into our response type.
    ///
    /// The first tool call (if any) becomes the structured call; parsing its
    /// argument payload is the action generator's job.
    fn from_api_response(
        api_response: ApiResponse,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let choice =
            api_response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::ApiError {
                    status_code: 200,
                    message: "No choices in response".into(),
                })?;

        let structured_call = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|tc| StructuredCall {
                name: tc.function.name,
                arguments: tc.function.arguments,
            });

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(GenerationResponse {
            content: choice.message.content.unwrap_or_default(),
            structured_call,
            model: api_response.model,
            usage,
            finish_reason: choice.finish_reason,
            metadata: serde_json::Map::new(),
        })
    }

    fn request_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl actuator_core::GenerationProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(&request),
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": false,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
            body["tool_choice"] = Self::to_api_tool_choice(&request.tool_choice);
        }

        debug!(provider = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Self::from_api_response(api_response)
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(Self::request_error)?;

        Ok(response.status().is_success())
    }

    async fn stream(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<GenerationChunk, ProviderError>>,
        ProviderError,
    > {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(&request),
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": true,
            "stream_options": { "include_usage": true },
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
            body["tool_choice"] = Self::to_api_tool_choice(&request.tool_choice);
        }

        debug!(provider = %self.name, model = %self.model, "Sending streaming request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&body)
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider streaming error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);
        let provider_name = self.name.clone();

        // Spawn task to read the SSE byte stream and parse chunks
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            // Accumulators for tool call deltas (keyed by index)
            let mut call_accumulators: std::collections::HashMap<u32, CallAccumulator> =
                std::collections::HashMap::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ProviderError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                // Append new bytes to our line buffer
                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // Process complete lines
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    // Skip empty lines and SSE comments
                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    // Handle "data: ..." lines
                    if let Some(data) = line.strip_prefix("data: ") {
                        let data = data.trim();

                        // "[DONE]" signals end of stream
                        if data == "[DONE]" {
                            // Emit final done chunk with accumulated calls
                            let final_calls: Vec<StructuredCall> = call_accumulators
                                .values()
                                .map(|acc| acc.to_call())
                                .collect();

                            let _ = tx
                                .send(Ok(GenerationChunk {
                                    content: None,
                                    calls: final_calls,
                                    done: true,
                                    usage: None,
                                }))
                                .await;
                            return;
                        }

                        // Parse the JSON chunk
                        match serde_json::from_str::<StreamResponse>(data) {
                            Ok(stream_resp) => {
                                if let Some(choice) = stream_resp.choices.first() {
                                    let delta = &choice.delta;

                                    // Accumulate tool call deltas
                                    if let Some(ref tc_deltas) = delta.tool_calls {
                                        for tc_delta in tc_deltas {
                                            let acc = call_accumulators
                                                .entry(tc_delta.index)
                                                .or_insert_with(|| CallAccumulator {
                                                    name: String::new(),
                                                    arguments: String::new(),
                                                });

                                            if let Some(ref func) = tc_delta.function {
                                                if let Some(ref name) = func.name {
                                                    acc.name = name.clone();
                                                }
                                                if let Some(ref args) = func.arguments {
                                                    acc.arguments.push_str(args);
                                                }
                                            }
                                        }
                                    }

                                    // Send content delta
                                    let has_content =
                                        delta.content.as_ref().is_some_and(|c| !c.is_empty());
                                    let is_finish = choice.finish_reason.is_some();

                                    if has_content || is_finish {
                                        let chunk = GenerationChunk {
                                            content: delta.content.clone(),
                                            calls: Vec::new(),
                                            done: false,
                                            usage: None,
                                        };

                                        if tx.send(Ok(chunk)).await.is_err() {
                                            return; // receiver dropped
                                        }
                                    }
                                }

                                // Handle usage in final stream chunk (stream_options)
                                if let Some(usage) = stream_resp.usage {
                                    let final_calls: Vec<StructuredCall> = call_accumulators
                                        .values()
                                        .map(|acc| acc.to_call())
                                        .collect();

                                    let chunk = GenerationChunk {
                                        content: None,
                                        calls: final_calls,
                                        done: true,
                                        usage: Some(Usage {
                                            prompt_tokens: usage.prompt_tokens,
                                            completion_tokens: usage.completion_tokens,
                                            total_tokens: usage.total_tokens,
                                        }),
                                    };

                                    let _ = tx.send(Ok(chunk)).await;
                                    return;
                                }
                            }
                            Err(e) => {
                                trace!(
                                    provider = %provider_name,
                                    data = %data,
                                    error = %e,
                                    "Ignoring unparseable SSE chunk"
                                );
                            }
                        }
                    }
                }
            }

            // Stream ended without [DONE]; still send a final chunk
            let final_calls: Vec<StructuredCall> = call_accumulators
                .values()
                .map(|acc| acc.to_call())
                .collect();

            let _ = tx
                .send(Ok(GenerationChunk {
                    content: None,
                    calls: final_calls,
                    done: true,
                    usage: None,
                }))
                .await;
        });

        Ok(rx)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    function: ApiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// --- Streaming SSE types ---

/// A single SSE `data: {...}` chunk from a streaming response.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<StreamToolCallDelta>>,
}

/// A tool call delta — arrives incrementally across chunks.
#[derive(Debug, Deserialize)]
struct StreamToolCallDelta {
    index: u32,
    #[serde(default)]
    function: Option<StreamFunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamFunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// Accumulates incremental tool call deltas into a complete call.
struct CallAccumulator {
    name: String,
    arguments: String,
}

impl CallAccumulator {
    fn to_call(&self) -> StructuredCall {
        StructuredCall {
            name: self.name.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_constructor() {
        let provider = OpenAiCompatProvider::openai("sk-test", "gpt-4");
        assert_eq!(provider.name(), "openai");
        assert!(provider.base_url.contains("api.openai.com"));
    }

    #[test]
    fn gemini_constructor() {
        let provider = OpenAiCompatProvider::gemini("key", "gemini-pro");
        assert_eq!(provider.name(), "gemini");
        assert!(provider.base_url.contains("generativelanguage.googleapis.com"));
        assert!(provider.base_url.ends_with("/openai"));
    }

    #[test]
    fn custom_base_url_trims_trailing_slash() {
        let provider =
            OpenAiCompatProvider::new("custom", "http://localhost:8000/v1/", "key", "local-model");
        assert_eq!(provider.base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn builder_overrides_sampling_parameters() {
        let provider = OpenAiCompatProvider::openai("sk-test", "gpt-4")
            .with_temperature(0.2)
            .with_max_tokens(512);
        assert_eq!(provider.temperature, 0.2);
        assert_eq!(provider.max_tokens, 512);
    }

    #[test]
    fn message_conversion_with_system_prompt() {
        let request = GenerationRequest {
            prompt: "List the files".into(),
            system_prompt: Some("You are a coding agent".into()),
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
        };
        let api_messages = OpenAiCompatProvider::to_api_messages(&request);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(api_messages[1].content.as_deref(), Some("List the files"));
    }

    #[test]
    fn message_conversion_without_system_prompt() {
        let request = GenerationRequest {
            prompt: "Hello".into(),
            system_prompt: None,
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
        };
        let api_messages = OpenAiCompatProvider::to_api_messages(&request);
        assert_eq!(api_messages.len(), 1);
        assert_eq!(api_messages[0].role, "user");
    }

    #[test]
    fn tool_definition_conversion() {
        let tools = vec![ToolDefinition {
            name: "read_file".into(),
            description: "Read a file from the workspace".into(),
            parameters: serde_json::json!({"type": "object"}),
        }];
        let api_tools = OpenAiCompatProvider::to_api_tools(&tools);
        assert_eq!(api_tools.len(), 1);
        assert_eq!(api_tools[0].function.name, "read_file");
        assert_eq!(api_tools[0].r#type, "function");
    }

    #[test]
    fn tool_choice_mapping() {
        assert_eq!(
            OpenAiCompatProvider::to_api_tool_choice(&ToolChoice::Auto),
            serde_json::json!("auto")
        );
        assert_eq!(
            OpenAiCompatProvider::to_api_tool_choice(&ToolChoice::None),
            serde_json::json!("none")
        );
        let named = OpenAiCompatProvider::to_api_tool_choice(&ToolChoice::Named("edit_file".into()));
        assert_eq!(named["function"]["name"], "edit_file");
    }

    #[test]
    fn response_parsing_plain_content() {
        let data = r#"{
            "model": "gpt-4",
            "choices": [{
                "message": {"role": "assistant", "content": "All done"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let api_response: ApiResponse = serde_json::from_str(data).unwrap();
        let response = OpenAiCompatProvider::from_api_response(api_response).unwrap();
        assert_eq!(response.content, "All done");
        assert!(response.structured_call.is_none());
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn response_parsing_extracts_structured_call() {
        let data = r#"{
            "model": "gpt-4",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "read_file", "arguments": "{\"file_path\": \"src/main.rs\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;
        let api_response: ApiResponse = serde_json::from_str(data).unwrap();
        let response = OpenAiCompatProvider::from_api_response(api_response).unwrap();
        assert_eq!(response.content, "");
        let call = response.structured_call.unwrap();
        assert_eq!(call.name, "read_file");
        assert!(call.arguments.contains("src/main.rs"));
    }

    #[test]
    fn response_without_choices_is_api_error() {
        let data = r#"{"model": "gpt-4", "choices": []}"#;
        let api_response: ApiResponse = serde_json::from_str(data).unwrap();
        let err = OpenAiCompatProvider::from_api_response(api_response).unwrap_err();
        assert!(err.to_string().contains("No choices in response"));
    }

    // --- SSE parsing tests ---

    #[test]
    fn parse_stream_content_delta() {
        let data = r#"{"choices":[{"delta":{"content":"Hello"},"finish_reason":null}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].delta.content.as_deref(), Some("Hello"));
        assert!(parsed.choices[0].finish_reason.is_none());
    }

    #[test]
    fn parse_stream_finish_chunk() {
        let data = r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.choices[0].finish_reason.as_deref(), Some("stop"));
        assert!(parsed.choices[0].delta.content.is_none());
    }

    #[test]
    fn parse_stream_tool_call_delta() {
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_abc","function":{"name":"search_code","arguments":""}}]},"finish_reason":null}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        let tc = &parsed.choices[0].delta.tool_calls.as_ref().unwrap()[0];
        assert_eq!(tc.index, 0);
        assert_eq!(
            tc.function.as_ref().unwrap().name.as_deref(),
            Some("search_code")
        );
    }

    #[test]
    fn parse_stream_tool_call_arguments_delta() {
        // Arguments arrive incrementally as fragments
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"pattern\""}}]},"finish_reason":null}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        let tc = &parsed.choices[0].delta.tool_calls.as_ref().unwrap()[0];
        assert!(tc.function.as_ref().unwrap().name.is_none()); // name only in first delta
        assert_eq!(
            tc.function.as_ref().unwrap().arguments.as_deref(),
            Some("{\"pattern\"")
        );
    }

    #[test]
    fn parse_stream_usage() {
        let data = r#"{"choices":[],"usage":{"prompt_tokens":10,"completion_tokens":5,"total_tokens":15}}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 5);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn call_accumulator_assembly() {
        let mut acc = CallAccumulator {
            name: String::new(),
            arguments: String::new(),
        };

        // First delta: name + argument fragment
        acc.name = "edit_file".into();
        acc.arguments.push_str("{\"file_path\"");

        // Second delta: more arguments
        acc.arguments.push_str(": \"src/lib.rs\"}");

        let call = acc.to_call();
        assert_eq!(call.name, "edit_file");
        assert_eq!(call.arguments, "{\"file_path\": \"src/lib.rs\"}");
    }

    #[test]
    fn parse_empty_delta() {
        let data = r#"{"choices":[{"delta":{},"finish_reason":null}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices[0].delta.content.is_none());
        assert!(parsed.choices[0].delta.tool_calls.is_none());
    }

    #[test]
    fn parse_multiple_tool_calls_in_stream() {
        // Two parallel tool calls in one delta
        let data = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_a","function":{"name":"find_files","arguments":""}},{"index":1,"id":"call_b","function":{"name":"read_file","arguments":""}}]},"finish_reason":null}]}"#;
        let parsed: StreamResponse = serde_json::from_str(data).unwrap();
        let tcs = parsed.choices[0].delta.tool_calls.as_ref().unwrap();
        assert_eq!(tcs.len(), 2);
        assert_eq!(tcs[0].index, 0);
        assert_eq!(tcs[1].index, 1);
    }
}
