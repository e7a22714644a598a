// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Analysis — the write half of the learning loop
//!
//! Scores a published post, asks the analyst model for a structured
//! critique, and persists the fully scored record into the content
//! library. A record is only ever inserted with all scoring fields
//! populated; the [`ContentRecord::scored`] constructor makes any other
//! state unrepresentable.
//!
//! ## Fallback policy
//!
//! A critique response that does not decode as strict JSON is absorbed
//! into the documented fallback record and the pipeline continues: bland
//! feedback degrades context building gracefully, a missing record would
//! not. Transport failures from the model or the store are NOT absorbed;
//! they surface tagged with their stage.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::prompts::ANALYST_SYSTEM_PROMPT;
use crate::application::PipelineError;
use crate::domain::content::{ContentRecord, EngagementMetrics, PublishedPost, RecordId};
use crate::domain::critique::Critique;
use crate::domain::llm::{CompletionRequest, LlmError, LlmProvider};
use crate::domain::scoring::score_metrics;
use crate::infrastructure::repository::ContentStore;

const CRITIQUE_TEMPERATURE: f32 = 0.3;
const CRITIQUE_MAX_TOKENS: u32 = 500;

/// Asks the analyst model for a structured verdict on one post.
pub struct CritiqueService {
    model: Arc<dyn LlmProvider>,
}

impl CritiqueService {
    pub fn new(model: Arc<dyn LlmProvider>) -> Self {
        Self { model }
    }

    /// Critique a post given its metrics and precomputed virality score.
    ///
    /// Does not persist anything; storage belongs to [`AnalysisService`].
    pub async fn critique(
        &self,
        post: &PublishedPost,
        metrics: &EngagementMetrics,
        score: f64,
    ) -> Result<Critique, LlmError> {
        let user_message = format!(
            "## Post Text\n{content}\n\n## Metrics\n\
             - Impressions: {impressions}\n\
             - Likes: {likes}\n\
             - Comments: {comments}\n\
             - Shares: {shares}\n\
             - Virality Score: {score} (Benchmark: 20 = Average, 50+ = Viral)\n\n\
             Analyze this post now.",
            content = post.content,
            impressions = metrics.impressions,
            likes = metrics.likes,
            comments = metrics.comments,
            shares = metrics.shares,
            score = score,
        );

        let request = CompletionRequest::new(ANALYST_SYSTEM_PROMPT, user_message)
            .with_temperature(CRITIQUE_TEMPERATURE)
            .with_max_tokens(CRITIQUE_MAX_TOKENS);

        let response = self.model.complete(&request).await?;

        match Critique::parse(&response.text) {
            Ok(critique) => Ok(critique),
            Err(err) => {
                warn!(error = %err, "analyst response unparseable, substituting fallback critique");
                Ok(Critique::fallback())
            }
        }
    }
}

/// Result of one analyze-and-store pass.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub score: f64,
    pub critique: Critique,
    pub stored_id: RecordId,
}

/// Runs the full write half: score -> critique -> persist.
pub struct AnalysisService {
    critic: CritiqueService,
    store: Arc<dyn ContentStore>,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn LlmProvider>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            critic: CritiqueService::new(model),
            store,
        }
    }

    pub async fn analyze_and_store(
        &self,
        post: PublishedPost,
        metrics: EngagementMetrics,
    ) -> Result<AnalysisOutcome, PipelineError> {
        let score = score_metrics(&metrics);

        let critique = self
            .critic
            .critique(&post, &metrics, score)
            .await
            .map_err(PipelineError::Critique)?;

        let record = ContentRecord::scored(post, score, &critique);
        let stored_id = self
            .store
            .insert(&record)
            .await
            .map_err(PipelineError::from_insert)?;

        info!(
            %stored_id,
            score,
            verdict = %record.verdict,
            topic = %record.topic,
            "scored content persisted to library"
        );

        Ok(AnalysisOutcome {
            score,
            critique,
            stored_id,
        })
    }
}
