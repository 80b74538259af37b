// Embedding backends: the encoder trait, the ONNX implementation, the
// registry, and vector helpers shared by the embedding strategies.

pub mod onnx;
pub mod registry;
pub mod scorer;
pub mod similarity;
pub mod traits;

pub use registry::{EncoderId, EncoderRegistry};
pub use scorer::TokenScorer;
pub use traits::{Pooling, TextEncoder};
