//! Error types for the Actuator domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Actuator operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Protocol errors ---
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Tool failures raised by a handler, as distinct from the unsuccessful
/// results a tool returns on purpose. The registry folds these into result
/// strings, so variant displays carry the bare reason without a
/// registry-level prefix.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Tool '{tool_name}' timed out after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("No protocol transport configured")]
    NotConfigured,

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Peer returned error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_not_found_display_matches_registry_contract() {
        let err = ToolError::NotFound("frobnicate".into());
        assert_eq!(err.to_string(), "Tool 'frobnicate' not found");
    }

    #[test]
    fn tool_timeout_names_the_tool_and_limit() {
        let err = ToolError::Timeout {
            tool_name: "search_code".into(),
            timeout_secs: 30,
        };
        assert_eq!(err.to_string(), "Tool 'search_code' timed out after 30s");
    }

    #[test]
    fn protocol_rpc_error_carries_peer_code() {
        let err = Error::Protocol(ProtocolError::Rpc {
            code: -32601,
            message: "Method not found: resources/read".into(),
        });
        assert!(err.to_string().contains("-32601"));
        assert!(err.to_string().contains("resources/read"));
    }
}
