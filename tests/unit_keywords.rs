// Unit tests for the keyword extractors, ranking and fusion.
//
// Everything here runs without model files: the embedding extractor is
// driven by a small deterministic encoder defined below.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use arabic_keywords::embeddings::similarity::round4;
use arabic_keywords::embeddings::{EncoderId, Pooling, TextEncoder};
use arabic_keywords::keywords::fusion::{fuse_dual, fuse_triple, yake_score_for};
use arabic_keywords::keywords::ranking::dedup_best;
use arabic_keywords::keywords::{
    EmbeddingExtractor, KeywordExtractor, MatchPolicy, RankedKeywords, ScoreOrder, Strategy,
    TfIdfExtractor, YakeExtractor,
};
use arabic_keywords::presets;
use arabic_keywords::text::{normalize, StopwordSet};
use arabic_keywords::ExtractError;

/// Prepared text of a preset, the way the engine feeds extractors.
fn prepared(topic: &str) -> String {
    let raw = presets::find(topic).unwrap().text;
    StopwordSet::global().filter(&normalize(raw)).join(" ")
}

fn assert_unique(ranked: &RankedKeywords) {
    let mut seen = HashSet::new();
    for kw in ranked.keywords() {
        assert!(seen.insert(kw), "duplicate keyword {kw}");
    }
}

// ============================================================
// TF-IDF
// ============================================================

#[tokio::test]
async fn tfidf_single_repeated_word_has_maximal_weight() {
    let tfidf = TfIdfExtractor::new(StopwordSet::global());
    let ranked = tfidf.extract("المعرفة المعرفة المعرفة", 10).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.entries[0].keyword, "المعرفة");
    assert!((ranked.entries[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn tfidf_top_five_on_a_preset() {
    let tfidf = TfIdfExtractor::new(StopwordSet::global());
    let ranked = tfidf.extract(&prepared("education"), 5).await.unwrap();

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked.entries[0].keyword, "التعليم");
    assert_eq!(ranked.order, ScoreOrder::HigherIsBetter);
    assert!(ranked.is_ranked());
    assert_unique(&ranked);
}

#[tokio::test]
async fn tfidf_without_terms_is_empty_input() {
    let tfidf = TfIdfExtractor::new(StopwordSet::global());
    let err = tfidf.extract("", 10).await.unwrap_err();
    assert!(matches!(err, ExtractError::EmptyInput));
}

// ============================================================
// YAKE
// ============================================================

#[tokio::test]
async fn yake_ranks_ascending_and_respects_top_n() {
    let yake = YakeExtractor::new(1).unwrap();
    let ranked = yake.extract(&prepared("space"), 7).await.unwrap();

    assert!(!ranked.is_empty());
    assert!(ranked.len() <= 7);
    assert_eq!(ranked.order, ScoreOrder::LowerIsBetter);
    assert!(ranked.is_ranked());
    assert_unique(&ranked);
}

#[tokio::test]
async fn yake_blank_text_is_empty_input() {
    let yake = YakeExtractor::new(1).unwrap();
    assert!(matches!(
        yake.extract(" ", 10).await,
        Err(ExtractError::EmptyInput)
    ));
}

// ============================================================
// Embedding similarity
// ============================================================

/// Bag-of-letters encoder: one dimension per Arabic letter (U+0621..U+064A).
struct LetterBagEncoder;

#[async_trait]
impl TextEncoder for LetterBagEncoder {
    async fn encode(
        &self,
        texts: &[String],
        _pooling: Pooling,
    ) -> arabic_keywords::Result<Vec<Vec<f64>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 42];
                for c in t.chars() {
                    let code = c as u32;
                    if (0x0621..=0x064A).contains(&code) {
                        v[(code - 0x0621) as usize] += 1.0;
                    }
                }
                v
            })
            .collect())
    }
}

#[tokio::test]
async fn embedding_scores_descend_and_are_rounded() {
    let extractor =
        EmbeddingExtractor::new(EncoderId::ArabicBert, Arc::new(LetterBagEncoder)).unwrap();
    let ranked = extractor.extract(&prepared("culture"), 5).await.unwrap();

    assert_eq!(ranked.len(), 5);
    assert!(ranked.is_ranked());
    assert_unique(&ranked);
    for entry in &ranked.entries {
        assert_eq!(entry.score, round4(entry.score));
        assert!(entry.score > 0.0);
    }
}

#[tokio::test]
async fn embedding_repeated_word_appears_once() {
    let extractor =
        EmbeddingExtractor::new(EncoderId::DistilBert, Arc::new(LetterBagEncoder)).unwrap();
    let ranked = extractor.extract("نور نور نور علم", 10).await.unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked.entries[0].keyword, "نور");
}

// ============================================================
// Ranking and fusion
// ============================================================

#[test]
fn dedup_direction_follows_score_order() {
    let pairs = vec![("علم".to_string(), 0.4), ("علم".to_string(), 0.2)];
    assert_eq!(dedup_best(pairs.clone(), ScoreOrder::HigherIsBetter)[0].score, 0.4);
    assert_eq!(dedup_best(pairs, ScoreOrder::LowerIsBetter)[0].score, 0.2);
}

#[test]
fn dual_fusion_is_additive() {
    let base = RankedKeywords::from_scores(
        vec![("الصحة".to_string(), 0.5), ("الرياضة".to_string(), 0.3)],
        ScoreOrder::HigherIsBetter,
        10,
    );
    let emb: HashMap<String, f64> = [("الصحة".to_string(), -0.1), ("الرياضة".to_string(), 0.4)]
        .into_iter()
        .collect();

    let fused = fuse_dual(&base, &emb, 10);
    for entry in &fused.entries {
        let expected = base.score_of(&entry.keyword).unwrap() + emb[&entry.keyword];
        assert!((entry.score - expected).abs() < 1e-12);
    }
    assert_eq!(fused.entries[0].keyword, "الرياضة");
}

#[test]
fn triple_fusion_adds_substring_matched_yake_score() {
    let base = RankedKeywords::from_scores(
        vec![("الفضاء".to_string(), 0.6)],
        ScoreOrder::HigherIsBetter,
        10,
    );
    let yake = RankedKeywords::from_scores(
        vec![("استكشاف الفضاء".to_string(), 0.02)],
        ScoreOrder::LowerIsBetter,
        10,
    );
    assert_eq!(yake_score_for("الفضاء", &yake, MatchPolicy::Exact), 0.0);

    let fused = fuse_triple(&base, &yake, &HashMap::new(), MatchPolicy::Substring, 10);
    assert!((fused.entries[0].score - 0.62).abs() < 1e-12);
}

// ============================================================
// Strategy selection
// ============================================================

#[test]
fn strategy_names_cover_the_seven_selectors() {
    let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "tfidf",
            "yake",
            "keybert-distilbert",
            "keybert-arabic-bert",
            "keybert-xlm-roberta",
            "tfidf-arabert",
            "tfidf-yake-arabert",
        ]
    );
    assert!("keybert-arabert".parse::<Strategy>().is_err());
}
