// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Application services: the write half (score, critique, persist) and the
//! read half (context building, generation) of the content learning loop.

pub mod analysis;
pub mod context;
pub mod generation;
pub(crate) mod prompts;

pub use analysis::{AnalysisOutcome, AnalysisService, CritiqueService};
pub use context::{ContextBuilder, PromptContext};
pub use generation::{AutoGeneration, GenerationService};

use crate::domain::llm::LlmError;
use crate::infrastructure::repository::{EmbeddingError, StoreError, StrategyError};

/// A pipeline failure, tagged with the stage that produced it.
///
/// Every public operation returns either a well-formed result or one of
/// these; there are no partially-populated successes.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("embedding stage failed: {0}")]
    Embedding(EmbeddingError),

    #[error("critique stage failed: {0}")]
    Critique(LlmError),

    #[error("store stage failed: {0}")]
    Store(StoreError),

    #[error("context stage failed: {0}")]
    Context(StoreError),

    #[error("generation stage failed: {0}")]
    Generation(LlmError),

    #[error("strategy stage failed: {0}")]
    Strategy(StrategyError),
}

impl PipelineError {
    /// Classify a store failure from the persist path, pulling the
    /// embedding stage out so callers see which round trip broke.
    pub(crate) fn from_insert(err: StoreError) -> Self {
        match err {
            StoreError::Embedding(e) => PipelineError::Embedding(e),
            other => PipelineError::Store(other),
        }
    }
}
