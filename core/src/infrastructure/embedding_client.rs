// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Embedding Client
//!
//! Adapters for the text-embedding API. `OpenAiEmbeddings` is the
//! production client; `HashEmbeddings` is a deterministic offline stand-in
//! used by tests and local development.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{OpenAiConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::infrastructure::repository::{EmbeddingError, EmbeddingProvider};

/// Client for the OpenAI embeddings endpoint.
pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddings {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let url = format!("{}/embeddings", self.config.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(if status == 401 || status == 403 {
                EmbeddingError::Authentication(error_text)
            } else {
                EmbeddingError::Service(format!("HTTP {}: {}", status, error_text))
            });
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Malformed(e.to_string()))?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::Malformed("empty data array".to_string()))
    }
}

/// Deterministic hash-based embedding for offline use.
///
/// Same text always maps to the same 384-dim vector (the dimension of
/// all-MiniLM-L6-v2), which is all the in-memory store needs for tests.
/// Not semantic: vectors for unrelated texts are uncorrelated, not
/// meaningfully distant.
pub struct HashEmbeddings;

impl HashEmbeddings {
    const DIMENSION: usize = 384;

    pub fn new() -> Self {
        Self
    }
}

impl Default for HashEmbeddings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();

        let embedding: Vec<f32> = (0..Self::DIMENSION)
            .map(|i| {
                let bit = (hash >> (i % 64)) & 1;
                bit as f32
            })
            .collect();

        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_embeddings_have_fixed_dimension() {
        let client = HashEmbeddings::new();
        let embedding = client.embed("a test post").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }

    #[tokio::test]
    async fn hash_embeddings_are_deterministic() {
        let client = HashEmbeddings::new();
        let a = client.embed("same text").await.unwrap();
        let b = client.embed("same text").await.unwrap();
        assert_eq!(a, b, "same text should produce the same embedding");
    }
}
