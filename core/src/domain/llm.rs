// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! LLM Provider Domain Interface (Anti-Corruption Layer)
//!
//! Defines the domain interface for chat-completion providers. Prevents
//! vendor lock-in by abstracting external LLM APIs; implementations live
//! in `infrastructure/providers/`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Domain interface for chat-completion providers.
///
/// Both the analyst (critique) and ghostwriter (generation) paths go
/// through this trait, so either can be pointed at any vendor.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one system-prompt + user-message completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// One completion call: a fixed system rubric plus a user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,

    /// Sampling temperature (low for the critique path, which expects
    /// strict JSON; provider default when `None`).
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, returned raw.
    pub text: String,

    /// Model that produced the response.
    pub model: String,

    /// Token usage stats.
    pub usage: TokenUsage,

    /// Why generation stopped.
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Natural completion
    Stop,

    /// Hit max_tokens limit
    Length,

    /// Blocked by content filter
    ContentFilter,
}

/// Errors that can occur during LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded")]
    RateLimit,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("missing configuration: {0}")]
    Config(String),
}
