// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::critique::Critique;

/// Platform assumed when a post carries no explicit platform tag.
///
/// Preserved from the upstream data pipeline, which defaults missing
/// platform fields to LinkedIn. Whether that is policy or a data-quality
/// gap is a product decision; see DESIGN.md.
pub const DEFAULT_PLATFORM: &str = "linkedin";

/// Identifier assigned by the content store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Categorical outcome label assigned by the analyst model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Flop,
    Average,
    Winner,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Flop => write!(f, "FLOP"),
            Verdict::Average => write!(f, "AVERAGE"),
            Verdict::Winner => write!(f, "WINNER"),
        }
    }
}

/// Raw engagement counters for one published post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub impressions: u64,
}

/// A published post before it has been scored and critiqued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub content: String,
    pub topic: String,
    pub style: String,
    pub platform: String,
}

impl PublishedPost {
    pub fn new(
        content: impl Into<String>,
        topic: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            topic: topic.into(),
            style: style.into(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}

/// One fully scored, critiqued piece of content, ready for the library.
///
/// Every scoring field is required at construction: a record that is not
/// fully scored cannot exist, so context building never observes a
/// half-populated row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content: String,
    pub topic: String,
    pub style: String,
    pub platform: String,
    pub virality_score: f64,
    pub verdict: Verdict,
    pub improvement_tip: String,
}

impl ContentRecord {
    /// Seal a published post together with its score and critique.
    pub fn scored(post: PublishedPost, virality_score: f64, critique: &Critique) -> Self {
        Self {
            content: post.content,
            topic: post.topic,
            style: post.style,
            platform: post.platform,
            virality_score,
            verdict: critique.verdict,
            improvement_tip: critique.improvement_tip.clone(),
        }
    }
}

/// A record as returned by the store's aggregate queries.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub record: ContentRecord,
}

/// A record returned by similarity search, with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub id: RecordId,
    pub record: ContentRecord,
    pub similarity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Verdict::Winner).unwrap(), "\"WINNER\"");
        assert_eq!(
            serde_json::from_str::<Verdict>("\"FLOP\"").unwrap(),
            Verdict::Flop
        );
    }

    #[test]
    fn verdict_rejects_unknown_label() {
        assert!(serde_json::from_str::<Verdict>("\"MEDIOCRE\"").is_err());
    }

    #[test]
    fn post_defaults_to_linkedin() {
        let post = PublishedPost::new("text", "Systems", "Contrarian");
        assert_eq!(post.platform, DEFAULT_PLATFORM);

        let post = post.with_platform("x");
        assert_eq!(post.platform, "x");
    }

    #[test]
    fn scored_record_carries_critique_fields() {
        let post = PublishedPost::new("text", "Systems", "Contrarian");
        let critique = Critique::fallback();
        let record = ContentRecord::scored(post, 12.5, &critique);

        assert_eq!(record.virality_score, 12.5);
        assert_eq!(record.verdict, Verdict::Average);
        assert_eq!(record.improvement_tip, "Review manually.");
    }
}
