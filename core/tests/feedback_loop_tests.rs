// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! End-to-end exercise of the learning loop against in-memory fakes:
//! analyze-and-store several posts, then confirm the next generation is
//! conditioned on the winners and tips that landed in the library.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use flywheel_core::application::{AnalysisService, AutoGeneration, GenerationService};
use flywheel_core::domain::{
    CompletionRequest, CompletionResponse, EngagementMetrics, FinishReason, LlmError, LlmProvider,
    PublishedPost, StyleId, TokenUsage, TopicId, Verdict, WeightedCombo,
};
use flywheel_core::infrastructure::{
    ContentStore, HashEmbeddings, InMemoryContentStore, StrategyError, StrategySource,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

/// Model fake that replays scripted responses in order and records every
/// request it sees.
struct ScriptedModel {
    responses: Mutex<Vec<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn request(&self, index: usize) -> CompletionRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let text = self.responses.lock().unwrap().remove(0);
        Ok(CompletionResponse {
            text,
            model: "scripted".to_string(),
            usage: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
        })
    }
}

struct FakeStrategy {
    combo: Option<WeightedCombo>,
    scheduled: Mutex<Vec<(TopicId, StyleId, NaiveDate)>>,
}

#[async_trait]
impl StrategySource for FakeStrategy {
    async fn weighted_combo(&self) -> Result<Option<WeightedCombo>, StrategyError> {
        Ok(self.combo.clone())
    }

    async fn schedule(
        &self,
        topic: TopicId,
        style: StyleId,
        date: NaiveDate,
    ) -> Result<(), StrategyError> {
        self.scheduled.lock().unwrap().push((topic, style, date));
        Ok(())
    }
}

const WINNER_CRITIQUE: &str = r#"{"verdict":"WINNER","primary_reason":"Hook stopped the scroll.","improvement_tip":"Keep the numbered system format.","repurpose_recommendation":"Yes"}"#;
const FLOP_CRITIQUE: &str = r#"{"verdict":"FLOP","primary_reason":"Wall of text.","improvement_tip":"Break paragraphs after two lines.","repurpose_recommendation":"No"}"#;

#[tokio::test]
async fn scored_posts_feed_the_next_generation() -> anyhow::Result<()> {
    init_tracing();

    let store = Arc::new(InMemoryContentStore::new(Arc::new(HashEmbeddings::new())));

    // Write half: analyze one winner and one flop.
    let analyst = Arc::new(ScriptedModel::new(&[WINNER_CRITIQUE, FLOP_CRITIQUE]));
    let analysis = AnalysisService::new(analyst.clone(), store.clone());

    let winner = analysis
        .analyze_and_store(
            PublishedPost::new("Why systems beat goals", "Systems", "Contrarian"),
            EngagementMetrics {
                likes: 300,
                comments: 90,
                shares: 40,
                impressions: 4000,
            },
        )
        .await?;
    assert_eq!(winner.critique.verdict, Verdict::Winner);
    assert_eq!(winner.score, 150.0);

    let flop = analysis
        .analyze_and_store(
            PublishedPost::new("Quarterly musings on leadership", "Leadership", "Essay"),
            EngagementMetrics {
                likes: 4,
                comments: 0,
                shares: 0,
                impressions: 9000,
            },
        )
        .await?;
    assert_eq!(flop.critique.verdict, Verdict::Flop);

    // Library state: exactly one winner, tips from both critiques.
    let winners = store.top_winners(5).await?;
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].id, winner.stored_id);

    let tips = store.recent_tips(5).await?;
    assert_eq!(
        tips,
        vec![
            "Break paragraphs after two lines.".to_string(),
            "Keep the numbered system format.".to_string(),
        ]
    );

    // Read half: generate on the winner's exact content text so the hash
    // embedding matches and retrieval surfaces it.
    let ghostwriter = Arc::new(ScriptedModel::new(&["The next post."]));
    let strategy = Arc::new(FakeStrategy {
        combo: Some(WeightedCombo {
            topic_id: TopicId(uuid::Uuid::new_v4()),
            topic_name: "Why systems beat goals".to_string(),
            style_id: StyleId(uuid::Uuid::new_v4()),
            style_name: "Contrarian".to_string(),
            style_instruction: "Challenge the obvious take.".to_string(),
        }),
        scheduled: Mutex::new(Vec::new()),
    });
    let generation = GenerationService::new(store.clone(), ghostwriter.clone(), strategy.clone());

    let outcome = generation
        .generate_with_weighted_combo("linkedin")
        .await?;

    match outcome {
        AutoGeneration::Generated { topic, style, content } => {
            assert_eq!(topic, "Why systems beat goals");
            assert_eq!(style, "Contrarian");
            assert_eq!(content, "The next post.");
        }
        AutoGeneration::Exhausted => panic!("combo was available"),
    }

    // The ghostwriter prompt carried the winner and both tips.
    let prompt = ghostwriter.request(0);
    assert!(prompt.user.contains("High-Performing Content"));
    assert!(prompt.user.contains("Why systems beat goals"));
    assert!(prompt.user.contains("Keep the numbered system format."));
    assert!(prompt.user.contains("Break paragraphs after two lines."));
    assert!(prompt.user.contains("## Style Instruction\nChallenge the obvious take."));

    // And the combo was recorded as used today.
    let scheduled = strategy.scheduled.lock().unwrap();
    assert_eq!(scheduled.len(), 1);

    Ok(())
}

#[tokio::test]
async fn exhausted_matrix_is_a_normal_outcome() {
    init_tracing();

    let store = Arc::new(InMemoryContentStore::new(Arc::new(HashEmbeddings::new())));
    let ghostwriter = Arc::new(ScriptedModel::new(&[]));
    let strategy = Arc::new(FakeStrategy {
        combo: None,
        scheduled: Mutex::new(Vec::new()),
    });
    let generation = GenerationService::new(store, ghostwriter.clone(), strategy);

    let outcome = generation
        .generate_with_weighted_combo("linkedin")
        .await
        .unwrap();

    assert_eq!(outcome, AutoGeneration::Exhausted);
    assert_eq!(ghostwriter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unparseable_critique_still_persists_a_record() {
    init_tracing();

    let store = Arc::new(InMemoryContentStore::new(Arc::new(HashEmbeddings::new())));
    let analyst = Arc::new(ScriptedModel::new(&["Sorry, I can't produce JSON today."]));
    let analysis = AnalysisService::new(analyst, store.clone());

    let outcome = analysis
        .analyze_and_store(
            PublishedPost::new("A post", "Systems", "Contrarian"),
            EngagementMetrics {
                likes: 10,
                comments: 2,
                shares: 1,
                impressions: 1000,
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.critique.verdict, Verdict::Average);
    assert_eq!(outcome.critique.improvement_tip, "Review manually.");

    // The fallback record landed in the library like any other.
    let tips = store.recent_tips(1).await.unwrap();
    assert_eq!(tips, vec!["Review manually.".to_string()]);
}
