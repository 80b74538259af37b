// The closed set of extraction strategies a caller can select.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::ranking::ScoreOrder;
use crate::embeddings::EncoderId;
use crate::error::{ExtractError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Term frequency weights.
    TfIdf,
    /// YAKE statistical costs.
    Yake,
    /// Cosine similarity to the document under one sentence encoder.
    KeyBert(EncoderId),
    /// TF-IDF plus AraBERT token scores.
    TfIdfAraBert,
    /// TF-IDF plus matched YAKE cost plus AraBERT token scores.
    TfIdfYakeAraBert,
}

impl Strategy {
    pub const ALL: [Self; 7] = [
        Self::TfIdf,
        Self::Yake,
        Self::KeyBert(EncoderId::DistilBert),
        Self::KeyBert(EncoderId::ArabicBert),
        Self::KeyBert(EncoderId::XlmRoberta),
        Self::TfIdfAraBert,
        Self::TfIdfYakeAraBert,
    ];

    /// Selector used on the command line and in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Self::TfIdf => "tfidf",
            Self::Yake => "yake",
            Self::KeyBert(EncoderId::DistilBert) => "keybert-distilbert",
            Self::KeyBert(EncoderId::ArabicBert) => "keybert-arabic-bert",
            Self::KeyBert(EncoderId::XlmRoberta) => "keybert-xlm-roberta",
            Self::KeyBert(EncoderId::AraBert) => "keybert-arabert",
            Self::TfIdfAraBert => "tfidf-arabert",
            Self::TfIdfYakeAraBert => "tfidf-yake-arabert",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::TfIdf => "TF-IDF",
            Self::Yake => "YAKE",
            Self::KeyBert(EncoderId::DistilBert) => "KeyBERT + DistilBERT",
            Self::KeyBert(EncoderId::ArabicBert) => "KeyBERT + Arabic BERT",
            Self::KeyBert(EncoderId::XlmRoberta) => "KeyBERT + XLM-RoBERTa",
            Self::KeyBert(EncoderId::AraBert) => "KeyBERT + AraBERT",
            Self::TfIdfAraBert => "TF-IDF + AraBERT",
            Self::TfIdfYakeAraBert => "TF-IDF + YAKE + AraBERT",
        }
    }

    pub fn order(self) -> ScoreOrder {
        match self {
            Self::Yake => ScoreOrder::LowerIsBetter,
            _ => ScoreOrder::HigherIsBetter,
        }
    }

    /// Encoders this strategy needs loaded.
    pub fn encoders(self) -> &'static [EncoderId] {
        match self {
            Self::TfIdf | Self::Yake => &[],
            Self::KeyBert(EncoderId::DistilBert) => &[EncoderId::DistilBert],
            Self::KeyBert(EncoderId::ArabicBert) => &[EncoderId::ArabicBert],
            Self::KeyBert(EncoderId::XlmRoberta) => &[EncoderId::XlmRoberta],
            Self::KeyBert(EncoderId::AraBert) => &[EncoderId::AraBert],
            Self::TfIdfAraBert | Self::TfIdfYakeAraBert => &[EncoderId::AraBert],
        }
    }

    /// Reject combinations that cannot run, before any work is done.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::KeyBert(id) if !id.supports_similarity() => Err(ExtractError::invalid(format!(
                "encoder '{id}' is not a sentence encoder"
            ))),
            other => Ok(other),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|st| st.name()).collect();
                ExtractError::invalid(format!(
                    "unknown strategy '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

impl Serialize for Strategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
