// Embedding-similarity keyword extraction.
//
// The document and every candidate n-gram are embedded with the same
// sentence encoder (mean pooling). A candidate's score is the cosine
// similarity between its vector and the document vector, rounded to four
// decimals. Works with any `TextEncoder`; the registry decides which model
// sits behind it.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ranking::{RankedKeywords, ScoreOrder};
use super::traits::KeywordExtractor;
use crate::embeddings::similarity::{cosine_similarity, round4};
use crate::embeddings::{EncoderId, Pooling, TextEncoder};
use crate::error::{ExtractError, Result};

/// Shortest word, in characters, that can be part of a candidate.
const MIN_WORD_CHARS: usize = 2;

pub const DEFAULT_BATCH_SIZE: usize = 32;

pub struct EmbeddingExtractor {
    backend: EncoderId,
    encoder: Arc<dyn TextEncoder>,
    ngram_range: (usize, usize),
    batch_size: usize,
}

impl EmbeddingExtractor {
    /// Unigram extractor over `encoder`, which must be a similarity backend.
    pub fn new(backend: EncoderId, encoder: Arc<dyn TextEncoder>) -> Result<Self> {
        if !backend.supports_similarity() {
            return Err(ExtractError::invalid(format!(
                "encoder '{backend}' cannot be used for embedding similarity"
            )));
        }
        Ok(Self {
            backend,
            encoder,
            ngram_range: (1, 1),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Candidate lengths in words, inclusive on both ends.
    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Result<Self> {
        if min == 0 || max < min {
            return Err(ExtractError::invalid(format!(
                "invalid n-gram range ({min}, {max})"
            )));
        }
        self.ngram_range = (min, max);
        Ok(self)
    }

    /// Number of candidates embedded per encoder call.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(ExtractError::invalid("batch size must be at least 1"));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn backend(&self) -> EncoderId {
        self.backend
    }

    /// Distinct lowercase n-grams of `text`, sorted.
    pub fn candidates(&self, text: &str) -> Vec<String> {
        let words: Vec<String> = text
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
            .collect();

        let (min, max) = self.ngram_range;
        let mut grams = BTreeSet::new();
        for n in min..=max {
            for window in words.windows(n) {
                grams.insert(window.join(" "));
            }
        }
        grams.into_iter().collect()
    }

    /// Score every candidate of `text` against the whole text.
    pub async fn rank(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        let candidates = self.candidates(text);
        if candidates.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let document = self
            .encoder
            .encode(&[text.to_string()], Pooling::Mean)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ExtractError::backend(self.backend.name(), "encoder returned no document vector")
            })?;

        let mut scores = Vec::with_capacity(candidates.len());
        for chunk in candidates.chunks(self.batch_size) {
            let vectors = self.encoder.encode(chunk, Pooling::Mean).await?;
            if vectors.len() != chunk.len() {
                return Err(ExtractError::backend(
                    self.backend.name(),
                    format!("expected {} vectors, got {}", chunk.len(), vectors.len()),
                ));
            }
            scores.extend(
                chunk
                    .iter()
                    .zip(&vectors)
                    .map(|(kw, v)| (kw.clone(), round4(cosine_similarity(v, &document)))),
            );
        }

        debug!(
            backend = self.backend.name(),
            candidates = scores.len(),
            "Scored embedding candidates"
        );

        let ranked = RankedKeywords::from_scores(scores, ScoreOrder::HigherIsBetter, top_n);
        if let Some(top) = ranked.entries.first() {
            info!(
                backend = self.backend.name(),
                keywords = ranked.len(),
                top_keyword = %top.keyword,
                top_score = top.score,
                "Extracted embedding keywords"
            );
        }
        Ok(ranked)
    }
}

#[async_trait]
impl KeywordExtractor for EmbeddingExtractor {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn order(&self) -> ScoreOrder {
        ScoreOrder::HigherIsBetter
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<RankedKeywords> {
        self.rank(text, top_n).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds a text as [count of 'ا', count of 'ل', 1.0], counting calls.
    struct LetterEncoder {
        calls: AtomicUsize,
    }

    impl LetterEncoder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextEncoder for LetterEncoder {
        async fn encode(&self, texts: &[String], _pooling: Pooling) -> Result<Vec<Vec<f64>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| {
                    let alef = t.chars().filter(|&c| c == 'ا').count() as f64;
                    let lam = t.chars().filter(|&c| c == 'ل').count() as f64;
                    vec![alef, lam, 1.0]
                })
                .collect())
        }
    }

    #[test]
    fn test_non_similarity_backend_rejected() {
        let result = EmbeddingExtractor::new(EncoderId::AraBert, LetterEncoder::new());
        assert!(matches!(result, Err(ExtractError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_candidates_are_unique_sorted_and_long_enough() {
        let extractor = EmbeddingExtractor::new(EncoderId::DistilBert, LetterEncoder::new()).unwrap();
        let candidates = extractor.candidates("نور و العلم نور");
        assert_eq!(candidates, vec!["العلم".to_string(), "نور".to_string()]);
    }

    #[test]
    fn test_bigram_candidates() {
        let extractor = EmbeddingExtractor::new(EncoderId::DistilBert, LetterEncoder::new())
            .unwrap()
            .with_ngram_range(1, 2)
            .unwrap();
        let candidates = extractor.candidates("العلم نور الحياة");
        assert!(candidates.contains(&"العلم نور".to_string()));
        assert!(candidates.contains(&"نور الحياة".to_string()));
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_invalid_ngram_range() {
        let extractor = EmbeddingExtractor::new(EncoderId::DistilBert, LetterEncoder::new()).unwrap();
        assert!(extractor.with_ngram_range(2, 1).is_err());
    }

    #[tokio::test]
    async fn test_empty_text_fails_without_encoding() {
        let encoder = LetterEncoder::new();
        let extractor = EmbeddingExtractor::new(EncoderId::XlmRoberta, encoder.clone()).unwrap();
        let err = extractor.rank("و", 10).await.unwrap_err();
        assert!(matches!(err, ExtractError::EmptyInput));
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scores_descend_rounded_and_bounded() {
        let encoder = LetterEncoder::new();
        let extractor = EmbeddingExtractor::new(EncoderId::ArabicBert, encoder.clone())
            .unwrap()
            .with_batch_size(2)
            .unwrap();
        let ranked = extractor
            .rank("الإسلام الحضارة تاريخ العلوم العالم بغداد", 4)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 4);
        assert!(ranked.is_ranked());
        for entry in &ranked.entries {
            assert_eq!(entry.score, round4(entry.score));
            assert!((-1.0..=1.0).contains(&entry.score));
        }
        // One document call plus three batches of two candidates.
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 4);
    }
}
