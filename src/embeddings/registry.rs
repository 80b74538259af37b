// Encoder identities and the process-wide registry of loaded encoders.
//
// Loading a transformer is by far the most expensive step in the system, so
// each encoder is loaded at most once per process, keyed by identity, and
// shared read-only afterwards. Every handle the registry gives out is wrapped
// in a request-level timeout, since inference is the only operation whose
// latency is unbounded.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::onnx::{OnnxEncoder, MODEL_FILE, TOKENIZER_FILE};
use super::traits::{Pooling, TextEncoder};
use crate::error::{ExtractError, Result};

/// A pretrained encoder the system knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncoderId {
    /// General-purpose compact sentence encoder.
    DistilBert,
    /// BERT pretrained on Arabic text.
    ArabicBert,
    /// Multilingual cross-lingual encoder.
    XlmRoberta,
    /// AraBERT, used for per-word token scores in the fused strategies.
    AraBert,
}

impl EncoderId {
    /// Encoders usable by the embedding-similarity strategy.
    pub const SIMILARITY: [Self; 3] = [Self::DistilBert, Self::ArabicBert, Self::XlmRoberta];

    pub const ALL: [Self; 4] = [
        Self::DistilBert,
        Self::ArabicBert,
        Self::XlmRoberta,
        Self::AraBert,
    ];

    /// Stable identifier, also the model's directory name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DistilBert => "distilbert",
            Self::ArabicBert => "arabic-bert",
            Self::XlmRoberta => "xlm-roberta",
            Self::AraBert => "arabert",
        }
    }

    /// Upstream model the exported files come from.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::DistilBert => "sentence-transformers/distilbert-base-nli-mean-tokens",
            Self::ArabicBert => "asafaya/bert-base-arabic",
            Self::XlmRoberta => "xlm-roberta-base",
            Self::AraBert => "aubmindlab/bert-base-arabert",
        }
    }

    pub fn supports_similarity(self) -> bool {
        Self::SIMILARITY.contains(&self)
    }

    /// RoBERTa vocabularies pad with id 1, BERT-family ones with 0.
    pub(crate) fn pad_token_id(self) -> i64 {
        match self {
            Self::XlmRoberta => 1,
            _ => 0,
        }
    }

    /// DistilBERT and RoBERTa exports take no segment ids.
    pub(crate) fn uses_token_type_ids(self) -> bool {
        matches!(self, Self::ArabicBert | Self::AraBert)
    }
}

impl fmt::Display for EncoderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncoderId {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|id| id.name()).collect();
                ExtractError::invalid(format!(
                    "unknown encoder '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Directory holding the files for `id` under `base`.
pub fn encoder_dir(base: &Path, id: EncoderId) -> PathBuf {
    base.join(id.name())
}

/// Whether both model files for `id` exist under `base`.
pub fn encoder_files_present(base: &Path, id: EncoderId) -> bool {
    let dir = encoder_dir(base, id);
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Loads encoders on first request and hands out shared handles.
pub struct EncoderRegistry {
    model_dir: PathBuf,
    timeout: Duration,
    loaded: Mutex<HashMap<EncoderId, Arc<dyn TextEncoder>>>,
}

impl EncoderRegistry {
    pub fn new(model_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            model_dir: model_dir.into(),
            timeout,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Register a ready-made encoder for `id` instead of loading one from disk.
    pub fn with_encoder(self, id: EncoderId, encoder: Arc<dyn TextEncoder>) -> Self {
        let timed = self.timed(id, encoder);
        if let Ok(mut loaded) = self.loaded.lock() {
            loaded.insert(id, timed);
        }
        self
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Whether `id` is already loaded or could be loaded from disk.
    pub fn is_available(&self, id: EncoderId) -> bool {
        let loaded = self
            .loaded
            .lock()
            .map(|loaded| loaded.contains_key(&id))
            .unwrap_or(false);
        loaded || encoder_files_present(&self.model_dir, id)
    }

    /// The shared encoder for `id`, loading it on first use.
    pub fn get(&self, id: EncoderId) -> Result<Arc<dyn TextEncoder>> {
        let mut loaded = self
            .loaded
            .lock()
            .map_err(|e| ExtractError::backend(id.name(), format!("registry lock poisoned: {e}")))?;

        if let Some(encoder) = loaded.get(&id) {
            return Ok(Arc::clone(encoder));
        }

        let dir = encoder_dir(&self.model_dir, id);
        let encoder = OnnxEncoder::load(id, &dir).map_err(|e| ExtractError::backend(id.name(), e))?;
        info!(encoder = id.name(), dir = %dir.display(), "Loaded encoder");

        let timed = self.timed(id, Arc::new(encoder));
        loaded.insert(id, Arc::clone(&timed));
        Ok(timed)
    }

    fn timed(&self, id: EncoderId, inner: Arc<dyn TextEncoder>) -> Arc<dyn TextEncoder> {
        Arc::new(TimedEncoder {
            id,
            inner,
            timeout: self.timeout,
        })
    }
}

/// Fails an encode call that runs longer than the configured limit.
struct TimedEncoder {
    id: EncoderId,
    inner: Arc<dyn TextEncoder>,
    timeout: Duration,
}

#[async_trait]
impl TextEncoder for TimedEncoder {
    async fn encode(&self, texts: &[String], pooling: Pooling) -> Result<Vec<Vec<f64>>> {
        match tokio::time::timeout(self.timeout, self.inner.encode(texts, pooling)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractError::backend(
                self.id.name(),
                format!("inference timed out after {:?}", self.timeout),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowEncoder;

    #[async_trait]
    impl TextEncoder for SlowEncoder {
        async fn encode(&self, texts: &[String], _pooling: Pooling) -> Result<Vec<Vec<f64>>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![vec![1.0]; texts.len()])
        }
    }

    #[test]
    fn test_encoder_names_round_trip() {
        for id in EncoderId::ALL {
            assert_eq!(id.name().parse::<EncoderId>().unwrap(), id);
        }
        assert!(matches!(
            "bert-large".parse::<EncoderId>(),
            Err(ExtractError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_only_sentence_encoders_support_similarity() {
        assert!(EncoderId::DistilBert.supports_similarity());
        assert!(EncoderId::XlmRoberta.supports_similarity());
        assert!(!EncoderId::AraBert.supports_similarity());
    }

    #[test]
    fn test_missing_model_is_backend_unavailable() {
        let registry = EncoderRegistry::new(
            std::env::temp_dir().join("arabic-keywords-no-models"),
            Duration::from_secs(1),
        );
        assert!(!registry.is_available(EncoderId::ArabicBert));
        let err = registry.get(EncoderId::ArabicBert).err().unwrap();
        assert!(matches!(err, ExtractError::BackendUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_injected_encoder_is_shared() {
        let registry = EncoderRegistry::new("/nonexistent", Duration::from_secs(1))
            .with_encoder(EncoderId::DistilBert, Arc::new(SlowEncoder));
        assert!(registry.is_available(EncoderId::DistilBert));

        let a = registry.get(EncoderId::DistilBert).unwrap();
        let b = registry.get(EncoderId::DistilBert).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_slow_inference_times_out() {
        let registry = EncoderRegistry::new("/nonexistent", Duration::from_millis(100))
            .with_encoder(EncoderId::DistilBert, Arc::new(SlowEncoder));
        let encoder = registry.get(EncoderId::DistilBert).unwrap();

        let err = encoder
            .encode(&["نص".to_string()], Pooling::Mean)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"), "got {err}");
    }
}
