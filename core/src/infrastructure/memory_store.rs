// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-memory content store
//!
//! Implements [`ContentStore`] over a `Vec` guarded by an async `RwLock`,
//! with brute-force cosine similarity. Used by tests and local runs where
//! no Supabase project is available; semantics mirror the remote store
//! (append-only, threshold-filtered search, recency-ordered tips).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::content::{ContentRecord, RecordId, ScoredMatch, StoredRecord, Verdict};
use crate::infrastructure::repository::{
    ContentStore, EmbeddingProvider, StoreError, SIMILARITY_THRESHOLD,
};

struct Row {
    id: RecordId,
    record: ContentRecord,
    embedding: Vec<f32>,
}

pub struct InMemoryContentStore {
    embeddings: Arc<dyn EmbeddingProvider>,
    // Insertion order doubles as recency order.
    rows: RwLock<Vec<Row>>,
}

impl InMemoryContentStore {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embeddings,
            rows: RwLock::new(Vec::new()),
        }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if mag_a == 0.0 || mag_b == 0.0 {
            return 0.0;
        }

        dot / (mag_a * mag_b)
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, record: &ContentRecord) -> Result<RecordId, StoreError> {
        let embedding = self.embeddings.embed(&record.content).await?;

        let id = RecordId::new();
        self.rows.write().await.push(Row {
            id,
            record: record.clone(),
            embedding,
        });
        Ok(id)
    }

    async fn similar(&self, query: &str, limit: usize) -> Result<Vec<ScoredMatch>, StoreError> {
        let query_embedding = self.embeddings.embed(query).await?;
        let rows = self.rows.read().await;

        let mut matches: Vec<ScoredMatch> = rows
            .iter()
            .map(|row| ScoredMatch {
                id: row.id,
                record: row.record.clone(),
                similarity: Self::cosine_similarity(&query_embedding, &row.embedding),
            })
            .filter(|m| m.similarity > SIMILARITY_THRESHOLD)
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);

        Ok(matches)
    }

    async fn top_winners(&self, limit: usize) -> Result<Vec<StoredRecord>, StoreError> {
        let rows = self.rows.read().await;

        let mut winners: Vec<StoredRecord> = rows
            .iter()
            .filter(|row| row.record.verdict == Verdict::Winner)
            .map(|row| StoredRecord {
                id: row.id,
                record: row.record.clone(),
            })
            .collect();

        winners.sort_by(|a, b| {
            b.record
                .virality_score
                .partial_cmp(&a.record.virality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        winners.truncate(limit);

        Ok(winners)
    }

    async fn recent_tips(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let rows = self.rows.read().await;

        Ok(rows
            .iter()
            .rev()
            .take(limit)
            .map(|row| row.record.improvement_tip.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::critique::{Critique, Repurpose};
    use crate::infrastructure::repository::EmbeddingError;

    /// Maps a handful of known strings to hand-picked unit vectors so
    /// similarity outcomes are exact.
    struct FixedEmbeddings;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbeddings {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(match text {
                t if t.contains("systems") => vec![1.0, 0.0, 0.0],
                t if t.contains("pricing") => vec![0.0, 1.0, 0.0],
                _ => vec![0.0, 0.0, 1.0],
            })
        }
    }

    fn record(content: &str, verdict: Verdict, score: f64, tip: &str) -> ContentRecord {
        ContentRecord {
            content: content.to_string(),
            topic: "Topic".to_string(),
            style: "Style".to_string(),
            platform: "linkedin".to_string(),
            virality_score: score,
            verdict,
            improvement_tip: tip.to_string(),
        }
    }

    fn store() -> InMemoryContentStore {
        InMemoryContentStore::new(Arc::new(FixedEmbeddings))
    }

    #[tokio::test]
    async fn insert_then_similar_returns_the_record() {
        let store = store();
        let rec = record("why systems beat goals", Verdict::Winner, 40.0, "tip");
        let id = store.insert(&rec).await.unwrap();

        let matches = store.similar("systems thinking", 1).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);
        assert!(matches[0].similarity > 0.99);
    }

    #[tokio::test]
    async fn similar_filters_below_threshold() {
        let store = store();
        store
            .insert(&record("pricing mistakes", Verdict::Winner, 55.0, "tip"))
            .await
            .unwrap();

        // Orthogonal embedding: similarity 0.0, below the 0.7 threshold.
        let matches = store.similar("systems thinking", 3).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn top_winners_ranked_by_score() {
        let store = store();
        store
            .insert(&record("systems post a", Verdict::Winner, 21.0, "a"))
            .await
            .unwrap();
        store
            .insert(&record("systems post b", Verdict::Flop, 99.0, "b"))
            .await
            .unwrap();
        store
            .insert(&record("systems post c", Verdict::Winner, 64.0, "c"))
            .await
            .unwrap();

        let winners = store.top_winners(5).await.unwrap();
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0].record.virality_score, 64.0);
        assert_eq!(winners[1].record.virality_score, 21.0);
    }

    #[tokio::test]
    async fn recent_tips_most_recent_first() {
        let store = store();
        for tip in ["first", "second", "third"] {
            store
                .insert(&record("post", Verdict::Average, 10.0, tip))
                .await
                .unwrap();
        }

        let tips = store.recent_tips(2).await.unwrap();
        assert_eq!(tips, vec!["third".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_inserts_get_distinct_ids() {
        let store = store();
        let rec = record("systems post", Verdict::Average, 10.0, "tip");
        let a = store.insert(&rec).await.unwrap();
        let b = store.insert(&rec).await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn critique_types_roundtrip_through_record() {
        // Guards the construction path the loop uses before insert.
        let critique = Critique {
            verdict: Verdict::Winner,
            primary_reason: "hook".to_string(),
            improvement_tip: "shorter".to_string(),
            repurpose_recommendation: Repurpose::Yes,
        };
        let post = crate::domain::content::PublishedPost::new("c", "t", "s");
        let rec = ContentRecord::scored(post, 50.0, &critique);
        assert_eq!(rec.verdict, Verdict::Winner);
    }
}
