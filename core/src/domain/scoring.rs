// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Virality scoring
//!
//! Pure normalization of raw engagement counters. Comments and shares are
//! worth more than likes because they cost the reader more; the result is
//! scaled per thousand impressions so small and large accounts are
//! comparable. Calibration: ~20 reads as average, ~50+ as viral. Those
//! anchors are only ever used as hints inside analyst prompts, never
//! enforced.

use crate::domain::content::EngagementMetrics;

const LIKE_WEIGHT: f64 = 1.0;
const COMMENT_WEIGHT: f64 = 2.0;
const SHARE_WEIGHT: f64 = 3.0;

/// Compute the normalized virality score for one post.
///
/// Returns `0.0` when `impressions` is zero: no reach means no signal,
/// which is not an error condition. The weighted sum is accumulated in
/// `f64` so extreme counter values cannot overflow.
pub fn virality_score(likes: u64, comments: u64, shares: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    let weighted =
        likes as f64 * LIKE_WEIGHT + comments as f64 * COMMENT_WEIGHT + shares as f64 * SHARE_WEIGHT;
    let per_thousand = impressions as f64 / 1000.0;
    round2(weighted / per_thousand)
}

/// Convenience wrapper over [`virality_score`] for a metrics struct.
pub fn score_metrics(metrics: &EngagementMetrics) -> f64 {
    virality_score(
        metrics.likes,
        metrics.comments,
        metrics.shares,
        metrics.impressions,
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_impressions_is_zero_score() {
        assert_eq!(virality_score(0, 0, 0, 0), 0.0);
        assert_eq!(virality_score(500, 120, 90, 0), 0.0);
    }

    #[test]
    fn reference_example() {
        // (85 + 2*22 + 3*5) / (4500/1000) = 144 / 4.5 = 32.0
        assert_eq!(virality_score(85, 22, 5, 4500), 32.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 10 / 3 = 3.333... -> 3.33
        assert_eq!(virality_score(10, 0, 0, 3000), 3.33);
    }

    #[test]
    fn monotonic_in_each_counter() {
        let base = virality_score(10, 5, 2, 1000);
        assert!(virality_score(11, 5, 2, 1000) >= base);
        assert!(virality_score(10, 6, 2, 1000) >= base);
        assert!(virality_score(10, 5, 3, 1000) >= base);
    }

    #[test]
    fn extreme_counters_do_not_panic() {
        let score = virality_score(u64::MAX, u64::MAX, u64::MAX, 1);
        assert!(score.is_finite());
        assert!(score > 0.0);
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            virality_score(85, 22, 5, 4500),
            virality_score(85, 22, 5, 4500)
        );
    }

    #[test]
    fn metrics_wrapper_matches_raw_call() {
        let metrics = EngagementMetrics {
            likes: 85,
            comments: 22,
            shares: 5,
            impressions: 4500,
        };
        assert_eq!(score_metrics(&metrics), 32.0);
    }
}
