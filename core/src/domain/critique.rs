// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Analyst verdicts
//!
//! The analyst model is asked for strict JSON matching [`Critique`]. The
//! decode step is schema-validating: anything that does not match the
//! four-field shape becomes a tagged [`CritiqueParseError`], which callers
//! route into the documented fallback record instead of failing the
//! pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::content::Verdict;

/// Whether the analyst recommends repurposing the post on another channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repurpose {
    Yes,
    No,
}

/// Structured verdict returned by the analyst model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Critique {
    pub verdict: Verdict,
    pub primary_reason: String,
    pub improvement_tip: String,
    pub repurpose_recommendation: Repurpose,
}

/// The analyst's response did not match the expected JSON shape.
#[derive(Debug, thiserror::Error)]
#[error("analyst response did not match critique schema: {0}")]
pub struct CritiqueParseError(#[from] serde_json::Error);

impl Critique {
    /// Strict decode of a raw model response.
    pub fn parse(raw: &str) -> Result<Self, CritiqueParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Substitute record used when the model response cannot be parsed.
    ///
    /// Deliberately bland: context building degrades gracefully on bland
    /// feedback, while a missing record would break retrieval.
    pub fn fallback() -> Self {
        Self {
            verdict: Verdict::Average,
            primary_reason: "Could not parse analysis.".to_string(),
            improvement_tip: "Review manually.".to_string(),
            repurpose_recommendation: Repurpose::No,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_response() {
        let raw = r#"{
            "verdict": "WINNER",
            "primary_reason": "Strong hook.",
            "improvement_tip": "Shorter CTA.",
            "repurpose_recommendation": "Yes"
        }"#;
        let critique = Critique::parse(raw).unwrap();
        assert_eq!(critique.verdict, Verdict::Winner);
        assert_eq!(critique.repurpose_recommendation, Repurpose::Yes);
    }

    #[test]
    fn rejects_prose() {
        assert!(Critique::parse("Great post, keep it up!").is_err());
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(Critique::parse(r#"{"verdict": "WINNER"}"#).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = r#"{
            "verdict": "FLOP",
            "primary_reason": "r",
            "improvement_tip": "t",
            "repurpose_recommendation": "No",
            "confidence": 0.9
        }"#;
        assert!(Critique::parse(raw).is_err());
    }

    #[test]
    fn fallback_is_exactly_the_documented_record() {
        let critique = Critique::fallback();
        assert_eq!(critique.verdict, Verdict::Average);
        assert_eq!(critique.primary_reason, "Could not parse analysis.");
        assert_eq!(critique.improvement_tip, "Review manually.");
        assert_eq!(critique.repurpose_recommendation, Repurpose::No);
    }
}
