// Keyword extraction: the extractor trait, the three scoring strategies,
// ranking helpers and score fusion.

pub mod fusion;
pub mod keybert;
pub mod ranking;
pub mod strategy;
pub mod tfidf;
pub mod traits;
pub mod yake;

pub use fusion::MatchPolicy;
pub use keybert::EmbeddingExtractor;
pub use ranking::{KeywordScore, RankedKeywords, ScoreOrder};
pub use strategy::Strategy;
pub use tfidf::{TfIdfExtractor, TfIdfVectorizer};
pub use traits::KeywordExtractor;
pub use yake::YakeExtractor;
