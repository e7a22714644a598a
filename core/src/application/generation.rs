// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Generation — the read half of the learning loop
//!
//! Conditions a ghostwriter model on retrieved context (past winners and
//! recent critique tips) and produces the next post. Each call walks
//! context -> generation -> schedule; no stage is retried, and a failed
//! stage aborts the call tagged with its name.
//!
//! Two deliberate policies:
//! - A context-build failure aborts the generation rather than proceeding
//!   without history. Generating blind would silently discard the entire
//!   point of the loop.
//! - Recording combo usage with the strategy source is fire-and-forget: a
//!   completed generation is not unwound because bookkeeping failed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::context::ContextBuilder;
use crate::application::prompts::GHOSTWRITER_SYSTEM_PROMPT;
use crate::application::PipelineError;
use crate::domain::llm::{CompletionRequest, LlmProvider};
use crate::infrastructure::repository::{ContentStore, StrategySource};

const GENERATION_MAX_TOKENS: u32 = 1024;

/// Outcome of a weighted-combo generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoGeneration {
    Generated {
        topic: String,
        style: String,
        content: String,
    },

    /// Every topic/style combination has been used. Expected steady
    /// state, not a failure.
    Exhausted,
}

/// Produces new posts conditioned on the content library.
pub struct GenerationService {
    context: ContextBuilder,
    model: Arc<dyn LlmProvider>,
    strategy: Arc<dyn StrategySource>,
}

impl GenerationService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        model: Arc<dyn LlmProvider>,
        strategy: Arc<dyn StrategySource>,
    ) -> Self {
        Self {
            context: ContextBuilder::new(store),
            model,
            strategy,
        }
    }

    /// Generate a post for `topic`, optionally under a style instruction.
    ///
    /// Returns the model's raw text; there is no JSON contract on the
    /// generation path.
    pub async fn generate(
        &self,
        topic: &str,
        style_instruction: Option<&str>,
        platform: &str,
    ) -> Result<String, PipelineError> {
        let context = self
            .context
            .build(topic)
            .await
            .map_err(PipelineError::Context)?;

        let style_block = style_instruction
            .map(|s| format!("\n## Style Instruction\n{}", s))
            .unwrap_or_default();

        let user_message = format!(
            "## Topic\n{topic}\n\n## Platform\n{platform}\n{style_block}\n\
             \n## CRITICAL IMPACT FEEDBACK (From Past Performance)\n{feedback}\n\
             \n---\n\
             Draft the content following the content structure.\n\
             IMPORTANT: Integrate the 'CRITICAL IMPACT FEEDBACK' above to ensure this post outperforms previous ones.\n\
             Output ONLY the post text.",
            topic = topic,
            platform = platform,
            style_block = style_block,
            feedback = context.render(),
        );

        let request = CompletionRequest::new(GHOSTWRITER_SYSTEM_PROMPT, user_message)
            .with_max_tokens(GENERATION_MAX_TOKENS);

        let response = self
            .model
            .complete(&request)
            .await
            .map_err(PipelineError::Generation)?;

        info!(
            topic,
            platform,
            winners = context.winners.len(),
            tips = context.tips.len(),
            "generated post"
        );

        Ok(response.text)
    }

    /// Generate using the next performance-weighted topic/style combo.
    ///
    /// When the strategy source reports no unused combination, returns
    /// [`AutoGeneration::Exhausted`] without touching the model.
    pub async fn generate_with_weighted_combo(
        &self,
        platform: &str,
    ) -> Result<AutoGeneration, PipelineError> {
        let combo = self
            .strategy
            .weighted_combo()
            .await
            .map_err(PipelineError::Strategy)?;

        let Some(combo) = combo else {
            info!("strategy matrix exhausted, no generation attempted");
            return Ok(AutoGeneration::Exhausted);
        };

        let content = self
            .generate(&combo.topic_name, Some(&combo.style_instruction), platform)
            .await?;

        // Usage bookkeeping must not unwind a successful generation.
        let today = Utc::now().date_naive();
        if let Err(err) = self
            .strategy
            .schedule(combo.topic_id, combo.style_id, today)
            .await
        {
            warn!(
                error = %err,
                topic = %combo.topic_name,
                style = %combo.style_name,
                "failed to record combo usage, continuing"
            );
        }

        Ok(AutoGeneration::Generated {
            topic: combo.topic_name,
            style: combo.style_name,
            content,
        })
    }
}
