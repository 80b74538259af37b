// Local transformer encoder running through ONNX Runtime.
//
// One instance wraps one exported model (`model.onnx`) and its tokenizer
// (`tokenizer.json`). The session sits behind Arc<Mutex> because
// `Session::run` takes &mut self and inference is offloaded to
// spawn_blocking; the mutex also serializes concurrent requests against the
// same model. Output is the last hidden state, pooled per text.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::registry::EncoderId;
use super::traits::{Pooling, TextEncoder};
use crate::error::ExtractError;

/// Longest input, in tokens, fed to the model.
const MAX_SEQUENCE_LEN: usize = 512;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct OnnxEncoder {
    id: EncoderId,
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxEncoder {
    /// Load the model and tokenizer for `id` from `model_dir`.
    pub fn load(id: EncoderId, model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Encoder model not found: {}\nExport {} to ONNX and place it there.",
                model_path.display(),
                id.model_id()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Encoder tokenizer not found: {}\nCopy the tokenizer.json of {} there.",
                tokenizer_path.display(),
                id.model_id()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load encoder model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load encoder tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LEN,
                ..TruncationParams::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        debug!(encoder = id.name(), "Loaded ONNX encoder from {}", model_dir.display());

        Ok(Self {
            id,
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl TextEncoder for OnnxEncoder {
    async fn encode(&self, texts: &[String], pooling: Pooling) -> crate::error::Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let id = self.id;
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || encode_sync(id, &session, &tokenizer, &texts, pooling))
            .await
            .context("spawn_blocking panicked")
            .and_then(|r| r)
            .map_err(|e| ExtractError::backend(id.name(), e))
    }
}

/// Tokenize, run one forward pass, and pool. Runs on a blocking thread.
fn encode_sync(
    id: EncoderId,
    session: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    texts: &[String],
    pooling: Pooling,
) -> Result<Vec<Vec<f64>>> {
    let encodings: Vec<_> = texts
        .iter()
        .map(|t| {
            tokenizer
                .encode(t.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);

    if max_len == 0 {
        return Ok(vec![Vec::new(); batch_size]);
    }

    // Right-pad every sequence to max_len with the model's pad token.
    let pad_id = id.pad_token_id();
    let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let ids = enc.get_ids();
        let mask = enc.get_attention_mask();
        let pad_len = max_len - ids.len();

        input_ids_flat.extend(ids.iter().map(|&id| id as i64));
        attention_mask_flat.extend(mask.iter().map(|&m| m as i64));
        input_ids_flat.extend(std::iter::repeat_n(pad_id, pad_len));
        attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
    }

    let shape = [batch_size as i64, max_len as i64];

    let input_ids_tensor =
        Tensor::from_array((shape, input_ids_flat)).context("Failed to create input_ids tensor")?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat.clone()))
        .context("Failed to create attention_mask tensor")?;

    // Output 0 is last_hidden_state: [batch, seq_len, hidden]
    let hidden_states = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = if id.uses_token_type_ids() {
            let token_type_ids_tensor =
                Tensor::from_array((shape, vec![0i64; batch_size * max_len]))
                    .context("Failed to create token_type_ids tensor")?;
            session.run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            })
        } else {
            session.run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            })
        }
        .context("Encoder ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract hidden state tensor")?;

        data.to_vec()
    };

    let hidden = hidden_states.len() / (batch_size * max_len);
    if hidden == 0 || hidden * batch_size * max_len != hidden_states.len() {
        anyhow::bail!(
            "Unexpected hidden state size {} for batch {}x{}",
            hidden_states.len(),
            batch_size,
            max_len
        );
    }

    let embeddings = (0..batch_size)
        .map(|i| {
            let token = |j: usize| {
                let offset = (i * max_len + j) * hidden;
                &hidden_states[offset..offset + hidden]
            };
            match pooling {
                Pooling::FirstToken => token(0).iter().map(|&v| v as f64).collect(),
                Pooling::Mean => {
                    let mask = &attention_mask_flat[i * max_len..(i + 1) * max_len];
                    mean_pool((0..max_len).map(token), mask, hidden)
                }
            }
        })
        .collect();

    debug!(
        encoder = id.name(),
        batch_size = batch_size,
        dim = hidden,
        ?pooling,
        "Computed embeddings"
    );

    Ok(embeddings)
}

/// Average token vectors weighted by the attention mask.
fn mean_pool<'a>(tokens: impl Iterator<Item = &'a [f32]>, mask: &[i64], hidden: usize) -> Vec<f64> {
    let mut sum = vec![0.0_f64; hidden];
    let mut mask_sum = 0.0_f64;

    for (token, &m) in tokens.zip(mask) {
        if m > 0 {
            let weight = m as f64;
            mask_sum += weight;
            for (acc, &v) in sum.iter_mut().zip(token) {
                *acc += v as f64 * weight;
            }
        }
    }

    if mask_sum > 0.0 {
        for val in &mut sum {
            *val /= mask_sum;
        }
    }
    sum
}
