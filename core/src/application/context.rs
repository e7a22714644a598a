// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Context building
//!
//! Assembles the retrieval block injected into generation prompts: similar
//! past winners plus recent critique tips. Store failures propagate; the
//! generation service owns the decision of what to do about them.

use std::sync::Arc;

use crate::domain::content::{ScoredMatch, Verdict};
use crate::infrastructure::repository::{ContentStore, StoreError};

const SIMILAR_LIMIT: usize = 3;
const TIPS_LIMIT: usize = 5;
const WINNER_EXCERPT_CHARS: usize = 300;

/// Rendered when there are no winners and no tips yet. Downstream prompt
/// assembly always receives a non-empty block.
pub const NO_HISTORY_SENTINEL: &str = "No historical data yet.";

const WINNERS_HEADER: &str = "## Examples of High-Performing Content on This Topic:";
const TIPS_HEADER: &str = "## Avoid These Mistakes (From Recent Analysis):";

/// Retrieval results backing one generation prompt.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Similar past content that carried a WINNER verdict, best match first.
    pub winners: Vec<ScoredMatch>,

    /// Recent improvement tips, most recent first.
    pub tips: Vec<String>,
}

impl PromptContext {
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty() && self.tips.is_empty()
    }

    /// Render the two-section text block, or the no-data sentinel.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_HISTORY_SENTINEL.to_string();
        }

        let mut parts = Vec::new();

        if !self.winners.is_empty() {
            parts.push(WINNERS_HEADER.to_string());
            for winner in &self.winners {
                parts.push(format!(
                    "- Score: {}\n{}...",
                    winner.record.virality_score,
                    excerpt(&winner.record.content)
                ));
            }
        }

        if !self.tips.is_empty() {
            parts.push(format!("\n{}", TIPS_HEADER));
            for tip in &self.tips {
                parts.push(format!("- {}", tip));
            }
        }

        parts.join("\n")
    }
}

fn excerpt(content: &str) -> String {
    content.chars().take(WINNER_EXCERPT_CHARS).collect()
}

/// Queries the content library for the material behind a prompt context.
pub struct ContextBuilder {
    store: Arc<dyn ContentStore>,
}

impl ContextBuilder {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Fetch winners similar to `topic` and the latest critique tips.
    ///
    /// Two fresh store round trips per call; nothing is cached.
    pub async fn build(&self, topic: &str) -> Result<PromptContext, StoreError> {
        let similar = self.store.similar(topic, SIMILAR_LIMIT).await?;
        let winners = similar
            .into_iter()
            .filter(|m| m.record.verdict == Verdict::Winner)
            .collect();

        let tips = self.store.recent_tips(TIPS_LIMIT).await?;

        Ok(PromptContext { winners, tips })
    }
}
