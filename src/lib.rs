// Arabic keywords: compare keyword extraction strategies on Arabic text.
//
// This is the library root. Text flows through `text` (normalization and
// stopwords), then `keywords` (the extractors and fusion), with
// `embeddings` supplying model inference and `pipeline` tying it together.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod keywords;
pub mod output;
pub mod pipeline;
pub mod presets;
pub mod text;

pub use error::{ExtractError, Result};
