// Text encoder trait: the only thing the extractors know about a model.
//
// An encoder turns texts into one vector each. The default implementation
// runs a local ONNX transformer, but anything that produces vectors (a
// remote service, a test double) fits behind the same seam.

use async_trait::async_trait;

use crate::error::Result;

/// How token vectors from the last hidden state collapse into one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pooling {
    /// Attention-mask-weighted mean over all tokens (sentence embeddings).
    Mean,
    /// The first token's vector ([CLS] / `<s>`).
    FirstToken,
}

#[async_trait]
pub trait TextEncoder: Send + Sync {
    /// Encode each text into one vector, in input order.
    async fn encode(&self, texts: &[String], pooling: Pooling) -> Result<Vec<Vec<f64>>>;
}
