// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Supabase content library adapter
//!
//! Anti-Corruption Layer for the PostgREST interface of the content
//! library: a plain insert into `content_library` plus three remote
//! procedures (`match_content`, `get_winners`, `get_recent_tips`) that the
//! database exposes over vector and aggregate queries.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{SupabaseConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::domain::content::{
    ContentRecord, RecordId, ScoredMatch, StoredRecord, Verdict, DEFAULT_PLATFORM,
};
use crate::infrastructure::repository::{
    ContentStore, EmbeddingProvider, StoreError, SIMILARITY_THRESHOLD,
};

const CONTENT_TABLE: &str = "content_library";

pub struct SupabaseContentStore {
    client: reqwest::Client,
    config: SupabaseConfig,
    embeddings: Arc<dyn EmbeddingProvider>,
}

#[derive(Serialize)]
struct ContentRow<'a> {
    content: &'a str,
    topic: &'a str,
    style: &'a str,
    platform: &'a str,
    virality_score: f64,
    verdict: Verdict,
    improvement_tip: &'a str,
    embedding: &'a [f32],
}

#[derive(Deserialize)]
struct InsertedRow {
    id: RecordId,
}

#[derive(Serialize)]
struct MatchParams {
    query_embedding: Vec<f32>,
    match_threshold: f32,
    match_count: usize,
}

#[derive(Serialize)]
struct LimitParams {
    limit_count: usize,
}

fn default_platform() -> String {
    // Rows synced before the platform column existed come back null.
    DEFAULT_PLATFORM.to_string()
}

#[derive(Deserialize)]
struct MatchRow {
    id: RecordId,
    content: String,
    topic: String,
    style: String,
    #[serde(default = "default_platform")]
    platform: String,
    virality_score: f64,
    verdict: Verdict,
    improvement_tip: String,
    similarity: f32,
}

#[derive(Deserialize)]
struct WinnerRow {
    id: RecordId,
    content: String,
    topic: String,
    style: String,
    #[serde(default = "default_platform")]
    platform: String,
    virality_score: f64,
    verdict: Verdict,
    improvement_tip: String,
}

#[derive(Deserialize)]
struct TipRow {
    improvement_tip: String,
}

impl MatchRow {
    fn into_match(self) -> ScoredMatch {
        ScoredMatch {
            id: self.id,
            similarity: self.similarity,
            record: ContentRecord {
                content: self.content,
                topic: self.topic,
                style: self.style,
                platform: self.platform,
                virality_score: self.virality_score,
                verdict: self.verdict,
                improvement_tip: self.improvement_tip,
            },
        }
    }
}

impl WinnerRow {
    fn into_stored(self) -> StoredRecord {
        StoredRecord {
            id: self.id,
            record: ContentRecord {
                content: self.content,
                topic: self.topic,
                style: self.style,
                platform: self.platform,
                virality_score: self.virality_score,
                verdict: self.verdict,
                improvement_tip: self.improvement_tip,
            },
        }
    }
}

impl SupabaseContentStore {
    pub fn new(config: SupabaseConfig, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            config,
            embeddings,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.url.trim_end_matches('/'),
            table
        )
    }

    fn rpc_url(&self, function: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{}",
            self.config.url.trim_end_matches('/'),
            function
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.service_key),
            )
    }

    async fn rpc<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        function: &str,
        params: &P,
    ) -> Result<R, StoreError> {
        let response = self
            .authed(self.client.post(self.rpc_url(function)))
            .json(params)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Service { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for SupabaseContentStore {
    async fn insert(&self, record: &ContentRecord) -> Result<RecordId, StoreError> {
        let embedding = self.embeddings.embed(&record.content).await?;

        let row = ContentRow {
            content: &record.content,
            topic: &record.topic,
            style: &record.style,
            platform: &record.platform,
            virality_score: record.virality_score,
            verdict: record.verdict,
            improvement_tip: &record.improvement_tip,
            embedding: &embedding,
        };

        let response = self
            .authed(self.client.post(self.table_url(CONTENT_TABLE)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Service { status, message });
        }

        let inserted: Vec<InsertedRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        let id = inserted
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| StoreError::Malformed("insert returned no rows".to_string()))?;

        tracing::debug!(%id, topic = %record.topic, "stored scored content record");
        Ok(id)
    }

    async fn similar(&self, query: &str, limit: usize) -> Result<Vec<ScoredMatch>, StoreError> {
        let query_embedding = self.embeddings.embed(query).await?;

        let rows: Vec<MatchRow> = self
            .rpc(
                "match_content",
                &MatchParams {
                    query_embedding,
                    match_threshold: SIMILARITY_THRESHOLD,
                    match_count: limit,
                },
            )
            .await?;

        Ok(rows.into_iter().map(MatchRow::into_match).collect())
    }

    async fn top_winners(&self, limit: usize) -> Result<Vec<StoredRecord>, StoreError> {
        let rows: Vec<WinnerRow> = self
            .rpc("get_winners", &LimitParams { limit_count: limit })
            .await?;

        Ok(rows.into_iter().map(WinnerRow::into_stored).collect())
    }

    async fn recent_tips(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let rows: Vec<TipRow> = self
            .rpc("get_recent_tips", &LimitParams { limit_count: limit })
            .await?;

        Ok(rows.into_iter().map(|r| r.improvement_tip).collect())
    }
}
