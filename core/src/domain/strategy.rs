// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Strategy matrix types
//!
//! Topics and styles form a matrix of candidate generations. The strategy
//! source picks pairs out of it (weighted by past performance) and tracks
//! which pairs have already been used. The loop only reads combos and
//! reports usage; weights are maintained by the backing service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleId(pub Uuid);

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A content topic in the strategy matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
}

/// A writing style in the strategy matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub id: StyleId,
    pub name: String,
    pub instruction: String,
    pub is_active: bool,
}

/// One upcoming slot on the content calendar, with the topic and style
/// names resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub style_id: StyleId,
    pub style_name: String,
    pub scheduled_date: NaiveDate,
}

/// A topic/style pair selected for the next generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCombo {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub style_id: StyleId,
    pub style_name: String,
    pub style_instruction: String,
}
