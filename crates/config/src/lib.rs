//! Configuration loading, validation, and management for Actuator.
//!
//! Loads configuration from `~/.actuator/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.actuator/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Control loop and workspace settings
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Generation backend configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Backend name: "openai" or "gemini"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key (usually supplied via environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier sent to the backend
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per generation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Override the backend's base URL (any OpenAI-compatible endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2000
}

/// Control loop and workspace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Root directory tools resolve relative paths against
    #[serde(default = "default_workspace_path")]
    pub workspace_path: PathBuf,

    /// Iteration cap for one run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Whether protocol-client features are enabled
    #[serde(default = "default_true")]
    pub enable_mcp: bool,

    /// Per-tool execution timeout in seconds
    #[serde(default = "default_tool_timeout")]
    pub tool_timeout_secs: u64,

    /// Verbose output (maps to debug-level logging)
    #[serde(default = "default_true")]
    pub verbose: bool,
}

fn default_workspace_path() -> PathBuf {
    PathBuf::from(".")
}
fn default_max_iterations() -> u32 {
    50
}
fn default_tool_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            workspace_path: default_workspace_path(),
            max_iterations: default_max_iterations(),
            enable_mcp: true,
            tool_timeout_secs: default_tool_timeout(),
            verbose: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.actuator/config.toml).
    ///
    /// Environment variables override file values:
    /// - `ACTUATOR_API_KEY` (highest priority), `OPENAI_API_KEY`, `GEMINI_API_KEY`
    /// - `LLM_PROVIDER`, `LLM_MODEL`, `LLM_TEMPERATURE`, `LLM_MAX_TOKENS`, `LLM_BASE_URL`
    /// - `WORKSPACE_PATH`, `MAX_ITERATIONS`, `ENABLE_MCP`, `TOOL_TIMEOUT`, `VERBOSE`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = std::env::var("ACTUATOR_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        }

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(base_url) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Ok(raw) = std::env::var("LLM_TEMPERATURE") {
            match raw.parse() {
                Ok(v) => self.llm.temperature = v,
                Err(_) => tracing::warn!("Ignoring unparseable LLM_TEMPERATURE: {raw}"),
            }
        }
        if let Ok(raw) = std::env::var("LLM_MAX_TOKENS") {
            match raw.parse() {
                Ok(v) => self.llm.max_tokens = v,
                Err(_) => tracing::warn!("Ignoring unparseable LLM_MAX_TOKENS: {raw}"),
            }
        }

        if let Ok(path) = std::env::var("WORKSPACE_PATH") {
            self.agent.workspace_path = PathBuf::from(path);
        }
        if let Ok(raw) = std::env::var("MAX_ITERATIONS") {
            match raw.parse() {
                Ok(v) => self.agent.max_iterations = v,
                Err(_) => tracing::warn!("Ignoring unparseable MAX_ITERATIONS: {raw}"),
            }
        }
        if let Ok(raw) = std::env::var("TOOL_TIMEOUT") {
            match raw.parse() {
                Ok(v) => self.agent.tool_timeout_secs = v,
                Err(_) => tracing::warn!("Ignoring unparseable TOOL_TIMEOUT: {raw}"),
            }
        }
        if let Ok(raw) = std::env::var("ENABLE_MCP") {
            self.agent.enable_mcp = raw.eq_ignore_ascii_case("true");
        }
        if let Ok(raw) = std::env::var("VERBOSE") {
            self.agent.verbose = raw.eq_ignore_ascii_case("true");
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".actuator")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.temperature < 0.0 || self.llm.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.llm.provider != "openai" && self.llm.provider != "gemini" {
            return Err(ConfigError::ValidationError(format!(
                "Unsupported LLM provider: {}",
                self.llm.provider
            )));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.llm.api_key.is_some()
    }

    /// Generate a default config TOML string (for scaffolding a config file).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4");
        assert_eq!(config.agent.max_iterations, 50);
        assert_eq!(config.agent.tool_timeout_secs, 30);
        assert!(config.agent.enable_mcp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.llm.provider, config.llm.provider);
        assert_eq!(parsed.agent.max_iterations, config.agent.max_iterations);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            llm: LlmConfig {
                temperature: 5.0,
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unsupported_provider_rejected() {
        let config = AppConfig {
            llm: LlmConfig {
                provider: "cohere".into(),
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Unsupported LLM provider: cohere"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.llm.provider, "openai");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[llm]
model = "gpt-4o-mini"

[agent]
max_iterations = 5
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.agent.tool_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nprovider = ").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig {
            llm: LlmConfig {
                api_key: Some("sk-secret".into()),
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("openai"));
        assert!(toml_str.contains("max_iterations = 50"));
    }
}
