// Keyword extractor trait: the shared capability behind every strategy.
//
// Each implementation scores candidate terms in a piece of prepared text
// and returns its best `top_n`. The trait is async because the embedding
// strategy runs model inference off the runtime; the purely statistical
// extractors complete immediately.

use async_trait::async_trait;

use super::ranking::{RankedKeywords, ScoreOrder};
use crate::error::Result;

#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Which end of the score axis this extractor ranks first.
    fn order(&self) -> ScoreOrder;

    /// Score candidates in `text` and return at most `top_n` of them.
    ///
    /// Fails with `ExtractError::EmptyInput` when `text` has no candidates.
    async fn extract(&self, text: &str, top_n: usize) -> Result<RankedKeywords>;
}
