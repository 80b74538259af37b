use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::embeddings::registry::{encoder_files_present, EncoderId};
use crate::error::{ExtractError, Result};
use crate::keywords::MatchPolicy;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BATCH_SIZE: usize = 32;
pub const DEFAULT_YAKE_NGRAMS: usize = 1;

/// Central configuration loaded from environment variables.
///
/// Nothing is required; every value has a default. The .env file is loaded
/// at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding one subdirectory per encoder
    pub model_dir: PathBuf,
    /// Ranking length when the caller doesn't give one
    pub top_n: usize,
    /// Upper bound on a single embedding call
    pub inference_timeout: Duration,
    /// How triple fusion matches anchor words against YAKE keywords
    pub fusion_match: MatchPolicy,
    /// Candidates embedded per encoder call
    pub batch_size: usize,
    /// Longest YAKE keyword, in words
    pub yake_ngrams: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            top_n: DEFAULT_TOP_N,
            inference_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fusion_match: MatchPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            yake_ngrams: DEFAULT_YAKE_NGRAMS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset or blank keys take their
    /// defaults; malformed values are `InvalidConfiguration`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_dir = get("KEYWORDS_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_model_dir);

        let top_n = positive(get("KEYWORDS_TOP_N"), "KEYWORDS_TOP_N", DEFAULT_TOP_N)?;
        let timeout_secs = positive(
            get("KEYWORDS_INFERENCE_TIMEOUT_SECS"),
            "KEYWORDS_INFERENCE_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?;
        let batch_size = positive(
            get("KEYWORDS_BATCH_SIZE"),
            "KEYWORDS_BATCH_SIZE",
            DEFAULT_BATCH_SIZE,
        )?;
        let yake_ngrams = positive(
            get("KEYWORDS_YAKE_NGRAMS"),
            "KEYWORDS_YAKE_NGRAMS",
            DEFAULT_YAKE_NGRAMS,
        )?;

        let fusion_match = match get("KEYWORDS_FUSION_MATCH") {
            Some(value) => value.parse()?,
            None => MatchPolicy::default(),
        };

        Ok(Self {
            model_dir,
            top_n,
            inference_timeout: Duration::from_secs(timeout_secs),
            fusion_match,
            batch_size,
            yake_ngrams,
        })
    }

    /// Encoders whose model files are present under `model_dir`.
    pub fn installed_encoders(&self) -> Vec<EncoderId> {
        EncoderId::ALL
            .into_iter()
            .filter(|&id| encoder_files_present(&self.model_dir, id))
            .collect()
    }
}

/// Default model root: `<data dir>/arabic-keywords/models`.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arabic-keywords")
        .join("models")
}

/// Parse a strictly positive integer, falling back to `default` when unset.
fn positive<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ExtractError::invalid(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}
