// Keyword engine: raw text -> cleaned text -> tokens -> ranked keywords.
//
// Owns the stateless extractors and the encoder registry, and turns a
// `Strategy` into the extractor that implements it. Every extractor sees
// the same prepared text: the cleaned text with stopwords removed, joined
// by single spaces.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::embeddings::{EncoderId, EncoderRegistry, TokenScorer};
use crate::error::{ExtractError, Result};
use crate::keywords::fusion::FusedExtractor;
use crate::keywords::{
    EmbeddingExtractor, KeywordExtractor, MatchPolicy, RankedKeywords, ScoreOrder, Strategy,
    TfIdfExtractor, YakeExtractor,
};
use crate::text::{normalize, StopwordSet};

/// Tunables the engine passes down to extractors.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub batch_size: usize,
    pub yake_ngrams: usize,
    pub fusion_match: MatchPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            batch_size: crate::config::DEFAULT_BATCH_SIZE,
            yake_ngrams: crate::config::DEFAULT_YAKE_NGRAMS,
            fusion_match: MatchPolicy::default(),
        }
    }
}

impl From<&Config> for EngineOptions {
    fn from(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            yake_ngrams: config.yake_ngrams,
            fusion_match: config.fusion_match,
        }
    }
}

/// Input after normalization and stopword filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedText {
    pub cleaned: String,
    pub tokens: Vec<String>,
}

impl PreparedText {
    /// Tokens joined by single spaces, the text every extractor scores.
    pub fn filtered(&self) -> String {
        self.tokens.join(" ")
    }
}

/// One strategy's ranking, labelled for display.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub strategy: Strategy,
    pub label: &'static str,
    #[serde(flatten)]
    pub ranking: RankedKeywords,
}

impl Extraction {
    pub fn order(&self) -> ScoreOrder {
        self.ranking.order
    }
}

/// Result of one strategy inside a comparison run.
#[derive(Debug)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub result: Result<Extraction>,
}

pub struct KeywordEngine {
    stopwords: Arc<StopwordSet>,
    registry: Arc<EncoderRegistry>,
    tfidf: Arc<TfIdfExtractor>,
    yake: Arc<YakeExtractor>,
    options: EngineOptions,
}

impl KeywordEngine {
    pub fn new(registry: Arc<EncoderRegistry>, options: EngineOptions) -> Result<Self> {
        let stopwords = StopwordSet::global();
        let yake = YakeExtractor::new(options.yake_ngrams)?;
        if options.batch_size == 0 {
            return Err(ExtractError::invalid("batch size must be at least 1"));
        }

        Ok(Self {
            tfidf: Arc::new(TfIdfExtractor::new(Arc::clone(&stopwords))),
            yake: Arc::new(yake),
            stopwords,
            registry,
            options,
        })
    }

    /// Engine with a fresh registry rooted at the configured model directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = EncoderRegistry::new(config.model_dir.clone(), config.inference_timeout);
        Self::new(Arc::new(registry), EngineOptions::from(config))
    }

    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Normalize `raw` and drop stopwords. Never fails.
    pub fn prepare(&self, raw: &str) -> PreparedText {
        let cleaned = normalize(raw);
        let tokens = self.stopwords.filter(&cleaned);
        debug!(
            raw_chars = raw.chars().count(),
            cleaned_chars = cleaned.chars().count(),
            tokens = tokens.len(),
            "Prepared text"
        );
        PreparedText { cleaned, tokens }
    }

    /// Run one strategy on `raw` and return at most `top_n` keywords.
    ///
    /// Fails with `InvalidConfiguration` for `top_n == 0` or an unusable
    /// strategy, and with `EmptyInput` when nothing survives normalization.
    /// Text made only of stopwords gives an empty ranking.
    pub async fn extract(&self, raw: &str, strategy: Strategy, top_n: usize) -> Result<Extraction> {
        let strategy = check_request(strategy, top_n)?;
        let prepared = self.prepare_non_empty(raw)?;
        self.run(&prepared, strategy, top_n).await
    }

    /// Run several strategies on the same input.
    ///
    /// Request-level problems (bad `top_n`, empty input) fail the whole call;
    /// each strategy's own failure is reported in its outcome.
    pub async fn compare(
        &self,
        raw: &str,
        strategies: &[Strategy],
        top_n: usize,
    ) -> Result<Vec<StrategyOutcome>> {
        if top_n == 0 {
            return Err(ExtractError::invalid("top_n must be at least 1"));
        }
        let prepared = self.prepare_non_empty(raw)?;

        let mut outcomes = Vec::with_capacity(strategies.len());
        for &strategy in strategies {
            let result = match strategy.validate() {
                Ok(strategy) => self.run(&prepared, strategy, top_n).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                warn!(strategy = strategy.name(), error = %e, "Strategy failed during comparison");
            }
            outcomes.push(StrategyOutcome { strategy, result });
        }
        Ok(outcomes)
    }

    /// The extractor implementing `strategy`, loading encoders as needed.
    pub fn extractor(&self, strategy: Strategy) -> Result<Arc<dyn KeywordExtractor>> {
        let extractor: Arc<dyn KeywordExtractor> = match strategy.validate()? {
            Strategy::TfIdf => self.tfidf.clone(),
            Strategy::Yake => self.yake.clone(),
            Strategy::KeyBert(id) => {
                let encoder = self.registry.get(id)?;
                Arc::new(
                    EmbeddingExtractor::new(id, encoder)?.with_batch_size(self.options.batch_size)?,
                )
            }
            Strategy::TfIdfAraBert => Arc::new(FusedExtractor::dual(
                Arc::clone(&self.tfidf),
                self.token_scorer()?,
            )),
            Strategy::TfIdfYakeAraBert => Arc::new(FusedExtractor::triple(
                Arc::clone(&self.tfidf),
                Arc::clone(&self.yake),
                self.options.fusion_match,
                self.token_scorer()?,
            )),
        };
        Ok(extractor)
    }

    fn token_scorer(&self) -> Result<TokenScorer> {
        Ok(TokenScorer::new(self.registry.get(EncoderId::AraBert)?))
    }

    fn prepare_non_empty(&self, raw: &str) -> Result<PreparedText> {
        let prepared = self.prepare(raw);
        if prepared.cleaned.is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        Ok(prepared)
    }

    async fn run(&self, prepared: &PreparedText, strategy: Strategy, top_n: usize) -> Result<Extraction> {
        let ranking = if prepared.tokens.is_empty() {
            debug!(strategy = strategy.name(), "Only stopwords left, nothing to rank");
            RankedKeywords::empty(strategy.order())
        } else {
            let extractor = self.extractor(strategy)?;
            match extractor.extract(&prepared.filtered(), top_n).await {
                Ok(ranking) => ranking,
                Err(ExtractError::EmptyInput) => RankedKeywords::empty(strategy.order()),
                Err(e) => return Err(e),
            }
        };

        info!(
            strategy = strategy.name(),
            top_n,
            keywords = ranking.len(),
            "Extraction complete"
        );

        Ok(Extraction {
            strategy,
            label: strategy.label(),
            ranking,
        })
    }
}

fn check_request(strategy: Strategy, top_n: usize) -> Result<Strategy> {
    if top_n == 0 {
        return Err(ExtractError::invalid("top_n must be at least 1"));
    }
    strategy.validate()
}
