// Per-word scalar scores from a token encoder.
//
// Each word is encoded on its own; the first-token vector of the last
// hidden state is reduced to the mean of its components. The number carries
// no calibrated meaning, it is the extra score mass the fused strategies add
// on top of TF-IDF weights.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::similarity::component_mean;
use super::traits::{Pooling, TextEncoder};
use crate::error::Result;

pub struct TokenScorer {
    encoder: Arc<dyn TextEncoder>,
}

impl TokenScorer {
    pub fn new(encoder: Arc<dyn TextEncoder>) -> Self {
        Self { encoder }
    }

    /// Mean of the first-token embedding of `word`.
    pub async fn score_word(&self, word: &str) -> Result<f64> {
        let vectors = self
            .encoder
            .encode(&[word.to_string()], Pooling::FirstToken)
            .await?;
        Ok(vectors.first().map(|v| component_mean(v)).unwrap_or(0.0))
    }

    /// Score every word independently. Repeated words are scored once.
    pub async fn score_words(&self, words: &[String]) -> Result<HashMap<String, f64>> {
        let mut scores = HashMap::with_capacity(words.len());
        for word in words {
            if scores.contains_key(word) {
                continue;
            }
            let score = self.score_word(word).await?;
            scores.insert(word.clone(), score);
        }
        debug!(words = scores.len(), "Computed token embedding scores");
        Ok(scores)
    }
}
