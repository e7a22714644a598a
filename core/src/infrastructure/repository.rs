// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Ports for the external stores
//!
//! Every component takes these traits as collaborators so tests can
//! substitute fakes; there are no module-level client singletons.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::content::{ContentRecord, RecordId, ScoredMatch, StoredRecord};
use crate::domain::strategy::{StyleId, TopicId, WeightedCombo};

/// Minimum cosine similarity a record must clear to count as "similar".
pub const SIMILARITY_THRESHOLD: f32 = 0.7;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("embedding service error: {0}")]
    Service(String),

    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

/// Converts text to a fixed-length vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The embedding step of an insert or search failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("network error: {0}")]
    Network(String),

    #[error("store rejected request (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// Append-only library of scored content, searchable by embedding.
///
/// No caching: every call is a fresh round trip, and consistency across
/// reads is whatever the backing service provides. `insert` is not
/// idempotent; callers needing at-most-once semantics de-duplicate first.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Embed `record.content`, persist all fields, return the assigned id.
    async fn insert(&self, record: &ContentRecord) -> Result<RecordId, StoreError>;

    /// Records most similar to `query`, best first, filtered to results
    /// above [`SIMILARITY_THRESHOLD`]. Empty when nothing clears it.
    async fn similar(&self, query: &str, limit: usize) -> Result<Vec<ScoredMatch>, StoreError>;

    /// WINNER-verdict records ranked by virality score, highest first.
    async fn top_winners(&self, limit: usize) -> Result<Vec<StoredRecord>, StoreError>;

    /// Improvement tips from recent critiques, most recent first.
    async fn recent_tips(&self, limit: usize) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("network error: {0}")]
    Network(String),

    #[error("strategy source rejected request (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("malformed strategy response: {0}")]
    Malformed(String),
}

/// Source of topic/style pairs, weighted by past performance.
#[async_trait]
pub trait StrategySource: Send + Sync {
    /// Next performance-weighted combo. `None` means every combination has
    /// been used: an expected steady state, not a failure.
    async fn weighted_combo(&self) -> Result<Option<WeightedCombo>, StrategyError>;

    /// Record that a combo was used, scheduled for `date`.
    async fn schedule(
        &self,
        topic: TopicId,
        style: StyleId,
        date: NaiveDate,
    ) -> Result<(), StrategyError>;
}
