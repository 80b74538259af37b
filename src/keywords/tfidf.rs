// TF-IDF keyword extraction.
//
// Tokens are lowercased whitespace tokens of at least two characters that
// are not stopwords. The vocabulary is capped by corpus term count before
// weighting, then the `keyword_extraction` crate computes smoothed IDF and
// L2-normalized weights over the retained terms only.
//
// The extractor fits a one-document corpus, so every IDF equals 1 and the
// weights reduce to normalized term frequency.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use tracing::{debug, info};

use super::ranking::{RankedKeywords, ScoreOrder};
use super::traits::KeywordExtractor;
use crate::error::{ExtractError, Result};
use crate::text::StopwordSet;

/// Shortest token the vectorizer treats as a term.
const MIN_TOKEN_CHARS: usize = 2;

/// Term-frequency / inverse-document-frequency vectorizer.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    stopwords: Arc<StopwordSet>,
}

impl TfIdfVectorizer {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    /// Lowercased terms of `doc` that survive the length and stopword checks.
    pub fn tokenize<'a>(&'a self, doc: &'a str) -> impl Iterator<Item = String> + 'a {
        doc.split_whitespace()
            .map(str::to_lowercase)
            .filter(move |t| t.chars().count() >= MIN_TOKEN_CHARS && !self.stopwords.contains(t))
    }

    /// The `max_features` terms with the highest total count across
    /// `corpus`, ties by term text.
    pub fn vocabulary(&self, corpus: &[String], max_features: usize) -> HashSet<String> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            for term in self.tokenize(doc) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);
        ranked.into_iter().map(|(term, _)| term).collect()
    }

    /// Fit on `corpus` and weight its retained terms, highest first with
    /// ties by term text.
    ///
    /// Returns `EmptyInput` when no document yields a single term.
    pub fn fit_score(&self, corpus: &[String], max_features: usize) -> Result<Vec<(String, f64)>> {
        let vocabulary = self.vocabulary(corpus, max_features);
        if vocabulary.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        // Documents reduced to retained terms, so normalization only sees
        // the capped vocabulary.
        let processed: Vec<String> = corpus
            .iter()
            .map(|doc| {
                self.tokenize(doc)
                    .filter(|t| vocabulary.contains(t))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let tfidf = TfIdf::new(TfIdfParams::ProcessedDocuments(&processed));
        let scores: Vec<(String, f64)> = tfidf
            .get_ranked_word_scores(vocabulary.len())
            .into_iter()
            .map(|(term, weight)| (term, f64::from(weight)))
            .collect();

        debug!(
            documents = corpus.len(),
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF weights"
        );
        Ok(scores)
    }
}

/// TF-IDF keyword extractor over a single document.
pub struct TfIdfExtractor {
    vectorizer: TfIdfVectorizer,
}

impl TfIdfExtractor {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(stopwords),
        }
    }

    /// Rank the terms of `text`, keeping at most `top_n`.
    pub fn rank(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        let scores = self.vectorizer.fit_score(&[text.to_string()], top_n)?;
        let ranked = RankedKeywords::from_scores(scores, ScoreOrder::HigherIsBetter, top_n);

        if let Some(top) = ranked.entries.first() {
            info!(
                keywords = ranked.len(),
                top_keyword = %top.keyword,
                top_score = top.score,
                "Extracted TF-IDF keywords"
            );
        }
        Ok(ranked)
    }
}

#[async_trait]
impl KeywordExtractor for TfIdfExtractor {
    fn name(&self) -> &str {
        "tfidf"
    }

    fn order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        self.rank(text, top_n)
    }
}
