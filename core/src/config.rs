// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Per-component configuration
//!
//! No global environment is read at startup. Each adapter takes its own
//! config struct, and each `from_env` constructor fails only when the
//! component that needs those credentials is actually built: entry points
//! that never touch the strategy source, for example, never need the
//! store credentials validated.

use std::time::Duration;

/// Default request timeout applied to every external HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Credentials for the OpenAI-compatible endpoint used for embeddings and
/// the analyst (critique) model.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub chat_model: String,
    pub embedding_model: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-4o".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(required("OPENAI_API_KEY")?);
        config.endpoint = optional("OPENAI_ENDPOINT", &config.endpoint);
        config.chat_model = optional("OPENAI_CHAT_MODEL", &config.chat_model);
        config.embedding_model = optional("OPENAI_EMBEDDING_MODEL", &config.embedding_model);
        Ok(config)
    }
}

/// Credentials for the Anthropic endpoint used by the ghostwriter
/// (generation) path.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "claude-3-5-sonnet-latest".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(required("ANTHROPIC_API_KEY")?);
        config.model = optional("ANTHROPIC_MODEL", &config.model);
        Ok(config)
    }
}

/// Credentials for the Supabase project backing the content library and
/// the strategy matrix.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service_key: service_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(required("SUPABASE_URL")?, required("SUPABASE_KEY")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_reported_by_name() {
        std::env::remove_var("FLYWHEEL_TEST_UNSET");
        let err = required("FLYWHEEL_TEST_UNSET").unwrap_err();
        assert!(err.to_string().contains("FLYWHEEL_TEST_UNSET"));
    }

    #[test]
    fn openai_defaults() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.chat_model, "gpt-4o");
        assert!(config.endpoint.starts_with("https://"));
    }
}
