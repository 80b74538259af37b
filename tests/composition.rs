// Composition tests: the engine wired to in-memory encoders.
//
// These exercise the full flow
//   raw text -> normalize -> stopwords -> strategy -> (fusion) -> ranking
// without model files. Deterministic encoders are registered in the
// encoder registry in place of the ONNX models.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use arabic_keywords::embeddings::{EncoderId, EncoderRegistry, Pooling, TextEncoder, TokenScorer};
use arabic_keywords::keywords::fusion::yake_score_for;
use arabic_keywords::keywords::{MatchPolicy, Strategy, YakeExtractor};
use arabic_keywords::output::comparison_json;
use arabic_keywords::pipeline::{EngineOptions, KeywordEngine};
use arabic_keywords::presets;
use arabic_keywords::ExtractError;

/// Spreads each character into one of eight buckets by code point, weighted
/// by its position in the bucket cycle. Same text, same vector.
struct CharCodeEncoder;

#[async_trait]
impl TextEncoder for CharCodeEncoder {
    async fn encode(
        &self,
        texts: &[String],
        _pooling: Pooling,
    ) -> arabic_keywords::Result<Vec<Vec<f64>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 8];
                for c in t.chars() {
                    let code = c as u32;
                    v[(code % 8) as usize] += f64::from(code % 5) / 10.0;
                }
                v
            })
            .collect())
    }
}

/// Never answers within any reasonable timeout.
struct StuckEncoder;

#[async_trait]
impl TextEncoder for StuckEncoder {
    async fn encode(
        &self,
        _texts: &[String],
        _pooling: Pooling,
    ) -> arabic_keywords::Result<Vec<Vec<f64>>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

fn registry_with_all_encoders() -> EncoderRegistry {
    EncoderId::ALL.into_iter().fold(
        EncoderRegistry::new("/nonexistent/arabic-keywords", Duration::from_secs(5)),
        |registry, id| registry.with_encoder(id, Arc::new(CharCodeEncoder)),
    )
}

fn engine_with(options: EngineOptions) -> KeywordEngine {
    KeywordEngine::new(Arc::new(registry_with_all_encoders()), options).unwrap()
}

fn engine() -> KeywordEngine {
    engine_with(EngineOptions::default())
}

fn preset(topic: &str) -> &'static str {
    presets::find(topic).unwrap().text
}

// ============================================================
// Chain: raw text -> single strategies
// ============================================================

#[tokio::test]
async fn every_strategy_runs_on_a_preset() {
    let engine = engine();
    for strategy in Strategy::ALL {
        let extraction = engine
            .extract(preset("economy"), strategy, 5)
            .await
            .unwrap_or_else(|e| panic!("{strategy} failed: {e}"));

        assert_eq!(extraction.strategy, strategy);
        assert_eq!(extraction.order(), strategy.order());
        assert!(extraction.ranking.len() <= 5, "{strategy}");
        assert!(extraction.ranking.is_ranked(), "{strategy}");
    }
}

#[tokio::test]
async fn tfidf_returns_exactly_top_n_when_enough_candidates() {
    let extraction = engine()
        .extract(preset("technology"), Strategy::TfIdf, 5)
        .await
        .unwrap();
    assert_eq!(extraction.ranking.len(), 5);
}

#[tokio::test]
async fn keywords_are_cleaned_and_not_stopwords() {
    let engine = engine();
    let prepared = engine.prepare(preset("health"));
    let extraction = engine
        .extract(preset("health"), Strategy::KeyBert(EncoderId::XlmRoberta), 10)
        .await
        .unwrap();

    for kw in extraction.ranking.keywords() {
        assert!(prepared.tokens.iter().any(|t| t == kw), "{kw} not a token");
    }
}

// ============================================================
// Chain: TF-IDF -> token scores -> fusion
// ============================================================

#[tokio::test]
async fn dual_fusion_adds_token_scores_to_tfidf_weights() {
    let engine = engine();
    let text = preset("environment");

    let tfidf = engine.extract(text, Strategy::TfIdf, 10).await.unwrap();
    let fused = engine.extract(text, Strategy::TfIdfAraBert, 10).await.unwrap();

    let scorer = TokenScorer::new(Arc::new(CharCodeEncoder));
    assert_eq!(fused.ranking.len(), tfidf.ranking.len());
    for entry in &fused.ranking.entries {
        let base = tfidf.ranking.score_of(&entry.keyword).unwrap();
        let extra = scorer.score_word(&entry.keyword).await.unwrap();
        assert!(
            (entry.score - (base + extra)).abs() < 1e-9,
            "{} fused {} != {} + {}",
            entry.keyword,
            entry.score,
            base,
            extra
        );
    }
}

#[tokio::test]
async fn triple_fusion_is_at_least_dual_fusion() {
    let engine = engine();
    let text = preset("space");

    let dual = engine.extract(text, Strategy::TfIdfAraBert, 10).await.unwrap();
    let triple = engine
        .extract(text, Strategy::TfIdfYakeAraBert, 10)
        .await
        .unwrap();

    // YAKE scores are non-negative, so every anchor can only gain.
    for entry in &triple.ranking.entries {
        let dual_score = dual.ranking.score_of(&entry.keyword).unwrap();
        assert!(entry.score >= dual_score - 1e-12);
    }
}

/// Fused scores of a triple-fusion run rebuilt from the parts, with the
/// YAKE side matched under `policy`.
async fn expected_triple_scores(
    text: &str,
    policy: MatchPolicy,
    top_n: usize,
) -> Vec<(String, f64)> {
    let engine = engine();
    let filtered = engine.prepare(text).filtered();
    let base = engine.extract(text, Strategy::TfIdf, top_n).await.unwrap().ranking;
    let yake = YakeExtractor::new(2).unwrap().rank(&filtered, top_n).unwrap();
    let words: Vec<String> = base.keywords().map(str::to_string).collect();
    let token_scores = TokenScorer::new(Arc::new(CharCodeEncoder))
        .score_words(&words)
        .await
        .unwrap();

    base.entries
        .iter()
        .map(|e| {
            let score = e.score
                + yake_score_for(&e.keyword, &yake, policy)
                + token_scores.get(&e.keyword).copied().unwrap_or(0.0);
            (e.keyword.clone(), score)
        })
        .collect()
}

#[tokio::test]
async fn configured_match_policy_reaches_triple_fusion() {
    let mut policies_disagree = false;

    for preset in &presets::PRESETS {
        let mut fused_by_policy = Vec::new();
        for policy in [MatchPolicy::Substring, MatchPolicy::Exact] {
            let fused = engine_with(EngineOptions {
                fusion_match: policy,
                yake_ngrams: 2,
                ..EngineOptions::default()
            })
            .extract(preset.text, Strategy::TfIdfYakeAraBert, 10)
            .await
            .unwrap();

            let expected = expected_triple_scores(preset.text, policy, 10).await;
            assert_eq!(fused.ranking.len(), expected.len(), "{}", preset.slug);
            for (keyword, score) in &expected {
                let got = fused.ranking.score_of(keyword).unwrap();
                assert!(
                    (got - score).abs() < 1e-9,
                    "{} {policy}: {keyword} fused {got}, expected {score}",
                    preset.slug
                );
            }
            fused_by_policy.push(fused.ranking);
        }

        let (substring, exact) = (&fused_by_policy[0], &fused_by_policy[1]);
        policies_disagree |= substring.entries.iter().any(|e| {
            exact
                .score_of(&e.keyword)
                .is_some_and(|s| (s - e.score).abs() > 1e-12)
        });
    }

    // Bigram YAKE keywords contain anchors that only substring matching sees.
    assert!(policies_disagree);
}

// ============================================================
// Edge cases through the engine
// ============================================================

#[tokio::test]
async fn stopword_only_text_gives_empty_ranking_for_every_strategy() {
    let engine = engine();
    for strategy in Strategy::ALL {
        let extraction = engine.extract("هو في على من", strategy, 10).await.unwrap();
        assert!(extraction.ranking.is_empty(), "{strategy}");
    }
}

#[tokio::test]
async fn foreign_only_text_is_empty_input() {
    let err = engine()
        .extract("The quick brown fox 42", Strategy::TfIdf, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::EmptyInput));
}

#[tokio::test]
async fn zero_top_n_fails_for_compare_too() {
    let err = engine()
        .compare(preset("history"), &Strategy::ALL, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidConfiguration(_)));
}

#[tokio::test]
async fn stuck_encoder_times_out_as_backend_unavailable() {
    let registry = EncoderRegistry::new("/nonexistent", Duration::from_millis(50))
        .with_encoder(EncoderId::DistilBert, Arc::new(StuckEncoder));
    let engine = KeywordEngine::new(Arc::new(registry), EngineOptions::default()).unwrap();

    let err = engine
        .extract(preset("travel"), Strategy::KeyBert(EncoderId::DistilBert), 10)
        .await
        .unwrap_err();
    assert!(err.is_transient());
}

// ============================================================
// Chain: compare -> JSON
// ============================================================

#[tokio::test]
async fn compare_reports_successes_and_failures_side_by_side() {
    let registry = EncoderRegistry::new("/nonexistent", Duration::from_secs(5))
        .with_encoder(EncoderId::ArabicBert, Arc::new(CharCodeEncoder));
    let engine = KeywordEngine::new(Arc::new(registry), EngineOptions::default()).unwrap();

    let strategies = [
        Strategy::TfIdf,
        Strategy::KeyBert(EncoderId::ArabicBert),
        Strategy::TfIdfAraBert,
    ];
    let outcomes = engine
        .compare(preset("social-justice"), &strategies, 5)
        .await
        .unwrap();

    assert!(outcomes[0].result.is_ok());
    assert!(outcomes[1].result.is_ok());
    assert!(matches!(
        outcomes[2].result,
        Err(ExtractError::BackendUnavailable { .. })
    ));

    let doc = comparison_json(&outcomes);
    let results = doc["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1]["strategy"], "keybert-arabic-bert");
    assert!(results[2]["error"].is_string());
}
