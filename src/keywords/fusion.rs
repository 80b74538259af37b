// Additive score fusion over a TF-IDF anchor set.
//
// The TF-IDF ranking fixes which words can appear; the other strategies only
// add score mass to those words. A word missing from a secondary source
// contributes 0 from it. YAKE costs are added unchanged even though lower
// is better for them; fused numbers are only compared with each other.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::ranking::{RankedKeywords, ScoreOrder};
use super::tfidf::TfIdfExtractor;
use super::traits::KeywordExtractor;
use super::yake::YakeExtractor;
use crate::embeddings::TokenScorer;
use crate::error::{ExtractError, Result};

/// How an anchor word is matched against YAKE keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// The word occurs anywhere inside the YAKE keyword text.
    #[default]
    Substring,
    /// The word equals one of the YAKE keyword's space-separated words.
    Token,
    /// The word equals the YAKE keyword.
    Exact,
}

impl MatchPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Token => "token",
            Self::Exact => "exact",
        }
    }

    pub fn matches(self, word: &str, keyword: &str) -> bool {
        match self {
            Self::Substring => keyword.contains(word),
            Self::Token => keyword.split_whitespace().any(|t| t == word),
            Self::Exact => keyword == word,
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchPolicy {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "token" => Ok(Self::Token),
            "exact" => Ok(Self::Exact),
            other => Err(ExtractError::invalid(format!(
                "unknown fusion match policy '{other}' (expected substring, token or exact)"
            ))),
        }
    }
}

/// Score of the first YAKE entry, in ascending-score order, matching `word`.
pub fn yake_score_for(word: &str, yake: &RankedKeywords, policy: MatchPolicy) -> f64 {
    let mut entries: Vec<_> = yake.entries.iter().collect();
    if yake.order == ScoreOrder::HigherIsBetter {
        entries.reverse();
    }
    entries
        .into_iter()
        .find(|e| policy.matches(word, &e.keyword))
        .map(|e| e.score)
        .unwrap_or(0.0)
}

/// TF-IDF weight plus token-embedding score for every anchor word.
pub fn fuse_dual(
    base: &RankedKeywords,
    embedding: &HashMap<String, f64>,
    top_n: usize,
) -> RankedKeywords {
    let fused = base.entries.iter().map(|e| {
        let extra = embedding.get(&e.keyword).copied().unwrap_or(0.0);
        (e.keyword.clone(), e.score + extra)
    });
    RankedKeywords::from_scores(fused, ScoreOrder::HigherIsBetter, top_n)
}

/// TF-IDF weight plus matched YAKE score plus token-embedding score.
pub fn fuse_triple(
    base: &RankedKeywords,
    yake: &RankedKeywords,
    embedding: &HashMap<String, f64>,
    policy: MatchPolicy,
    top_n: usize,
) -> RankedKeywords {
    let fused = base.entries.iter().map(|e| {
        let yake_score = yake_score_for(&e.keyword, yake, policy);
        let extra = embedding.get(&e.keyword).copied().unwrap_or(0.0);
        (e.keyword.clone(), e.score + yake_score + extra)
    });
    RankedKeywords::from_scores(fused, ScoreOrder::HigherIsBetter, top_n)
}

/// TF-IDF anchors boosted by token-embedding scores and, optionally, YAKE.
pub struct FusedExtractor {
    tfidf: Arc<TfIdfExtractor>,
    yake: Option<(Arc<YakeExtractor>, MatchPolicy)>,
    scorer: TokenScorer,
}

impl FusedExtractor {
    /// TF-IDF plus token-embedding scores.
    pub fn dual(tfidf: Arc<TfIdfExtractor>, scorer: TokenScorer) -> Self {
        Self {
            tfidf,
            yake: None,
            scorer,
        }
    }

    /// TF-IDF plus matched YAKE scores plus token-embedding scores.
    pub fn triple(
        tfidf: Arc<TfIdfExtractor>,
        yake: Arc<YakeExtractor>,
        policy: MatchPolicy,
        scorer: TokenScorer,
    ) -> Self {
        Self {
            tfidf,
            yake: Some((yake, policy)),
            scorer,
        }
    }
}

#[async_trait]
impl KeywordExtractor for FusedExtractor {
    fn name(&self) -> &str {
        if self.yake.is_some() {
            "tfidf-yake-embedding"
        } else {
            "tfidf-embedding"
        }
    }

    fn order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        let base = self.tfidf.rank(text, top_n)?;
        let words: Vec<String> = base.keywords().map(str::to_string).collect();
        let embedding = self.scorer.score_words(&words).await?;

        let fused = match &self.yake {
            None => fuse_dual(&base, &embedding, top_n),
            Some((yake, policy)) => {
                let yake_ranked = yake.rank(text, top_n)?;
                fuse_triple(&base, &yake_ranked, &embedding, *policy, top_n)
            }
        };

        info!(
            fusion = self.name(),
            anchors = base.len(),
            keywords = fused.len(),
            "Fused keyword scores"
        );
        Ok(fused)
    }
}
