// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Supabase strategy matrix adapter
//!
//! The strategy matrix lives in three tables (`topics`, `styles`,
//! `content_schedule`) plus two remote procedures for combo selection.
//! Combo weighting happens inside the database; this client only asks for
//! the next pair and reports usage. Topic and style removal is soft
//! delete only (`is_active = false`), so historical schedules keep their
//! references.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{SupabaseConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::domain::strategy::{ScheduledSlot, Style, StyleId, Topic, TopicId, WeightedCombo};
use crate::infrastructure::repository::{StrategyError, StrategySource};

pub struct SupabaseStrategyClient {
    client: reqwest::Client,
    config: SupabaseConfig,
}

#[derive(Serialize)]
struct ScheduleRow<'a> {
    topic_id: TopicId,
    style_id: StyleId,
    scheduled_date: &'a str,
}

#[derive(Serialize)]
struct NewTopic<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct NewStyle<'a> {
    name: &'a str,
    instruction: &'a str,
}

#[derive(Serialize)]
struct Deactivate {
    is_active: bool,
}

// General field patches. `updated_at` is the literal `now()` so the
// database stamps the change; PostgREST coerces it server side.
#[derive(Serialize)]
struct TopicPatch<'a> {
    updated_at: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

#[derive(Serialize)]
struct StylePatch<'a> {
    updated_at: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

// `content_schedule` rows with the topic/style names embedded via
// PostgREST resource joins.
#[derive(Deserialize)]
struct ScheduleEntryRow {
    topic_id: TopicId,
    style_id: StyleId,
    scheduled_date: NaiveDate,
    topics: NameRef,
    styles: NameRef,
}

#[derive(Deserialize)]
struct NameRef {
    name: String,
}

impl From<ScheduleEntryRow> for ScheduledSlot {
    fn from(row: ScheduleEntryRow) -> Self {
        Self {
            topic_id: row.topic_id,
            topic_name: row.topics.name,
            style_id: row.style_id,
            style_name: row.styles.name,
            scheduled_date: row.scheduled_date,
        }
    }
}

impl SupabaseStrategyClient {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.service_key),
            )
    }

    async fn read_rows<R: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, StrategyError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StrategyError::Service { status, message });
        }
        response
            .json()
            .await
            .map_err(|e| StrategyError::Malformed(e.to_string()))
    }

    async fn rpc_combo(&self, function: &str) -> Result<Option<WeightedCombo>, StrategyError> {
        let response = self
            .authed(self.client.post(self.url(&format!("rpc/{}", function))))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let combos: Vec<WeightedCombo> = self.read_rows(response).await?;
        Ok(combos.into_iter().next())
    }

    /// Random unused topic/style pair, ignoring performance weights.
    pub async fn next_combo(&self) -> Result<Option<WeightedCombo>, StrategyError> {
        self.rpc_combo("get_next_combo").await
    }

    pub async fn list_topics(&self, active_only: bool) -> Result<Vec<Topic>, StrategyError> {
        let mut request = self
            .authed(self.client.get(self.url("topics")))
            .query(&[("select", "*"), ("order", "name")]);
        if active_only {
            request = request.query(&[("is_active", "eq.true")]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;
        self.read_rows(response).await
    }

    pub async fn add_topic(&self, name: &str, description: &str) -> Result<Topic, StrategyError> {
        let response = self
            .authed(self.client.post(self.url("topics")))
            .header("Prefer", "return=representation")
            .json(&NewTopic { name, description })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let rows: Vec<Topic> = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StrategyError::Malformed("insert returned no rows".to_string()))
    }

    /// Patch an existing topic; fields left as `None` are untouched.
    pub async fn update_topic(
        &self,
        topic: TopicId,
        name: Option<&str>,
        description: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Topic, StrategyError> {
        let response = self
            .authed(self.client.patch(self.url("topics")))
            .query(&[("id", format!("eq.{}", topic))])
            .header("Prefer", "return=representation")
            .json(&TopicPatch {
                updated_at: "now()",
                name,
                description,
                is_active,
            })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let rows: Vec<Topic> = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StrategyError::Malformed("update matched no rows".to_string()))
    }

    pub async fn deactivate_topic(&self, topic: TopicId) -> Result<(), StrategyError> {
        let response = self
            .authed(self.client.patch(self.url("topics")))
            .query(&[("id", format!("eq.{}", topic))])
            .json(&Deactivate { is_active: false })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        Self::expect_success(response).await
    }

    pub async fn list_styles(&self, active_only: bool) -> Result<Vec<Style>, StrategyError> {
        let mut request = self
            .authed(self.client.get(self.url("styles")))
            .query(&[("select", "*"), ("order", "name")]);
        if active_only {
            request = request.query(&[("is_active", "eq.true")]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;
        self.read_rows(response).await
    }

    pub async fn add_style(&self, name: &str, instruction: &str) -> Result<Style, StrategyError> {
        let response = self
            .authed(self.client.post(self.url("styles")))
            .header("Prefer", "return=representation")
            .json(&NewStyle { name, instruction })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let rows: Vec<Style> = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StrategyError::Malformed("insert returned no rows".to_string()))
    }

    /// Patch an existing style; fields left as `None` are untouched.
    pub async fn update_style(
        &self,
        style: StyleId,
        name: Option<&str>,
        instruction: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Style, StrategyError> {
        let response = self
            .authed(self.client.patch(self.url("styles")))
            .query(&[("id", format!("eq.{}", style))])
            .header("Prefer", "return=representation")
            .json(&StylePatch {
                updated_at: "now()",
                name,
                instruction,
                is_active,
            })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let rows: Vec<Style> = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StrategyError::Malformed("update matched no rows".to_string()))
    }

    pub async fn deactivate_style(&self, style: StyleId) -> Result<(), StrategyError> {
        let response = self
            .authed(self.client.patch(self.url("styles")))
            .query(&[("id", format!("eq.{}", style))])
            .json(&Deactivate { is_active: false })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        Self::expect_success(response).await
    }

    /// Upcoming schedule, oldest slot first, capped at one row per day
    /// requested.
    pub async fn get_schedule(&self, days: u32) -> Result<Vec<ScheduledSlot>, StrategyError> {
        let response = self
            .authed(self.client.get(self.url("content_schedule")))
            .query(&[
                ("select", "*, topics(name), styles(name)".to_string()),
                ("scheduled_date", "gte.now()".to_string()),
                ("order", "scheduled_date".to_string()),
                ("limit", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let rows: Vec<ScheduleEntryRow> = self.read_rows(response).await?;
        Ok(rows.into_iter().map(ScheduledSlot::from).collect())
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), StrategyError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StrategyError::Service { status, message });
        }
        Ok(())
    }
}

#[async_trait]
impl StrategySource for SupabaseStrategyClient {
    async fn weighted_combo(&self) -> Result<Option<WeightedCombo>, StrategyError> {
        self.rpc_combo("get_weighted_combo").await
    }

    async fn schedule(
        &self,
        topic: TopicId,
        style: StyleId,
        date: NaiveDate,
    ) -> Result<(), StrategyError> {
        let date = date.format("%Y-%m-%d").to_string();
        let response = self
            .authed(self.client.post(self.url("content_schedule")))
            .header("Prefer", "return=minimal")
            .json(&ScheduleRow {
                topic_id: topic,
                style_id: style,
                scheduled_date: &date,
            })
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StrategyError::Service { status, message });
        }

        Ok(())
    }
}
