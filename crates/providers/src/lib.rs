//! LLM provider implementations for Actuator.
//!
//! All providers implement the `actuator_core::GenerationProvider` trait.
//! `build_provider` selects the correct backend from configuration.

use std::sync::Arc;

use actuator_config::LlmConfig;
use actuator_core::GenerationProvider;
use actuator_core::error::Error;

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

/// Build a provider from configuration.
///
/// A configured `base_url` overrides the backend's default endpoint, so any
/// OpenAI-compatible server can stand in for either named backend.
pub fn build_provider(config: &LlmConfig) -> actuator_core::Result<Arc<dyn GenerationProvider>> {
    let api_key = config.api_key.clone().unwrap_or_default();

    let provider = match config.provider.as_str() {
        "openai" => match &config.base_url {
            Some(url) => OpenAiCompatProvider::new("openai", url, api_key, &config.model),
            None => OpenAiCompatProvider::openai(api_key, &config.model),
        },
        "gemini" => match &config.base_url {
            Some(url) => OpenAiCompatProvider::new("gemini", url, api_key, &config.model),
            None => OpenAiCompatProvider::gemini(api_key, &config.model),
        },
        other => {
            return Err(Error::Config {
                message: format!("Unsupported LLM provider: {other}"),
            });
        }
    };

    Ok(Arc::new(
        provider
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens),
    ))
}
