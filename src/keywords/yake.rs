// YAKE keyword extraction.
//
// Unsupervised, single-document statistics: term frequency, position,
// dispersion across sentences and context diversity combine into a cost
// where lower means more keyword-like. Configured for Arabic stopwords and,
// by default, unigrams.

use async_trait::async_trait;
use tracing::{info, warn};
use yake_rust::{get_n_best, Config as YakeConfig, StopWords};

use super::ranking::{RankedKeywords, ScoreOrder};
use super::traits::KeywordExtractor;
use crate::error::{ExtractError, Result};

/// Language code of the predefined YAKE stopword list.
const LANGUAGE: &str = "ar";

/// YAKE extractor with Arabic stopwords.
pub struct YakeExtractor {
    ngrams: usize,
    stopwords: StopWords,
}

impl YakeExtractor {
    /// `ngrams` is the longest keyword, in words, YAKE may produce.
    pub fn new(ngrams: usize) -> Result<Self> {
        if ngrams == 0 {
            return Err(ExtractError::invalid("YAKE n-gram size must be at least 1"));
        }

        let stopwords = StopWords::predefined(LANGUAGE).unwrap_or_else(|| {
            warn!(
                language = LANGUAGE,
                "No predefined YAKE stopwords for language, using defaults"
            );
            StopWords::default()
        });

        Ok(Self {
            ngrams,
            stopwords,
        })
    }

    /// Rank keywords in `text` by ascending cost, keeping at most `top_n`.
    pub fn rank(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        if text.split_whitespace().next().is_none() {
            return Err(ExtractError::EmptyInput);
        }

        let config = YakeConfig {
            ngrams: self.ngrams,
            ..YakeConfig::default()
        };

        // YAKE may hand results back in any order; ranking sorts explicitly.
        let scored = get_n_best(top_n, text, &self.stopwords, &config)
            .into_iter()
            .map(|item| (item.keyword, item.score));
        let ranked = RankedKeywords::from_scores(scored, ScoreOrder::LowerIsBetter, top_n);

        if let Some(top) = ranked.entries.first() {
            info!(
                keywords = ranked.len(),
                top_keyword = %top.keyword,
                top_score = top.score,
                "Extracted YAKE keywords"
            );
        }
        Ok(ranked)
    }
}

#[async_trait]
impl KeywordExtractor for YakeExtractor {
    fn name(&self) -> &str {
        "yake"
    }

    fn order(&self) -> ScoreOrder {
        ScoreOrder::LowerIsBetter
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        self.rank(text, top_n)
    }
}
