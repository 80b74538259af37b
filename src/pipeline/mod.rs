// Extraction pipeline: a single entry point from raw text to rankings.

pub mod engine;

pub use engine::{EngineOptions, Extraction, KeywordEngine, PreparedText, StrategyOutcome};
