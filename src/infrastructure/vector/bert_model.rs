//! BERT sentence embeddings using candle-transformers
//!
//! Follows the sentence-transformers recipe:
//! 1. Tokenize with padding and truncation
//! 2. BERT forward pass to get token embeddings
//! 3. Mean pooling weighted by attention mask
//! 4. L2 normalization to unit vectors

use crate::domain::models::EmbeddingModel;
use crate::domain::ports::EmbeddingService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationDirection,
    TruncationParams, TruncationStrategy,
};

/// Sentence-transformers truncate at 256 word pieces
const MAX_SEQ_LENGTH: usize = 256;

/// Texts per forward pass
const BATCH_SIZE: usize = 32;

/// BERT embedding model with its tokenizer
///
/// Loading is blocking (network download on first use, then disk). Share a
/// loaded model through [`super::ModelRegistry`] instead of constructing
/// it per document.
pub struct BertEmbeddingModel {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_id: String,
    dimensions: usize,
    max_seq_length: usize,
}

impl BertEmbeddingModel {
    /// Load `model_type`, downloading weights into `cache_dir` (or the
    /// default HuggingFace cache) when missing
    pub fn new(model_type: EmbeddingModel, cache_dir: Option<&Path>) -> Result<Self> {
        let device = Self::select_device();
        let repo_id = model_type.repo_id();

        tracing::info!(model = %model_type, repo = repo_id, device = ?device, "loading embedding model");

        let api = match cache_dir {
            Some(dir) => hf_hub::api::sync::ApiBuilder::new()
                .with_cache_dir(dir.to_path_buf())
                .build(),
            None => hf_hub::api::sync::Api::new(),
        }
        .context("Failed to initialize HuggingFace API")?;
        let repo = api.model(repo_id.to_string());

        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to download tokenizer.json from HuggingFace")?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            anyhow::anyhow!("Failed to load tokenizer from {}: {e}", tokenizer_path.display())
        })?;

        let config_path = repo
            .get("config.json")
            .context("Failed to download config.json from HuggingFace")?;
        let config_file = std::fs::File::open(&config_path).context("Failed to open config.json")?;
        let config: Config =
            serde_json::from_reader(config_file).context("Failed to parse config.json")?;

        let dimensions = model_type.dimensions();
        if config.hidden_size != dimensions {
            anyhow::bail!(
                "Model dimension mismatch: expected {}, got {} from config",
                dimensions,
                config.hidden_size
            );
        }

        let weights_path = repo
            .get("model.safetensors")
            .context("Failed to download model.safetensors from HuggingFace")?;
        let weights = std::fs::read(&weights_path).with_context(|| {
            format!("Failed to read model weights from {}", weights_path.display())
        })?;
        let vb = VarBuilder::from_buffered_safetensors(weights, DType::F32, &device)
            .context("Failed to load model weights from safetensors")?;

        let model =
            BertModel::load(vb, &config).context("Failed to create BERT model from weights")?;

        tracing::info!(
            model = %model_type,
            dimensions,
            layers = config.num_hidden_layers,
            "embedding model loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            model_id: model_type.to_string(),
            dimensions,
            max_seq_length: config.max_position_embeddings.min(MAX_SEQ_LENGTH),
        })
    }

    /// Select compute device: CUDA, then Metal, then CPU
    fn select_device() -> Device {
        if candle_core::utils::cuda_is_available() {
            match Device::new_cuda(0) {
                Ok(device) => return device,
                Err(e) => tracing::warn!("CUDA available but initialization failed: {e}. Falling back to CPU"),
            }
        }

        if candle_core::utils::metal_is_available() {
            match Device::new_metal(0) {
                Ok(device) => return device,
                Err(e) => tracing::warn!("Metal available but initialization failed: {e}. Falling back to CPU"),
            }
        }

        Device::Cpu
    }

    /// Embed texts synchronously, in batches of [`BATCH_SIZE`]
    fn embed_batch_sync(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(BATCH_SIZE) {
            embeddings.extend(self.embed_one_batch(batch)?);
        }
        Ok(embeddings)
    }

    fn embed_one_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let (input_ids, attention_mask) = self.tokenize(texts).context("Tokenization failed")?;
        let token_type_ids =
            Tensor::zeros_like(&input_ids).context("Failed to create token_type_ids")?;

        let hidden_states = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .context("BERT forward pass failed")?;

        let pooled = mean_pool(&hidden_states, &attention_mask).context("Mean pooling failed")?;
        let normalized = normalize_l2(&pooled).context("L2 normalization failed")?;

        normalized
            .to_vec2::<f32>()
            .context("Failed to convert embeddings tensor")
    }

    /// Tokenize with batch-longest padding and truncation
    ///
    /// Returns `(input_ids, attention_mask)`, both `[batch, seq_len]`; the
    /// mask is F32 so it can weight hidden states directly.
    fn tokenize(&self, texts: &[&str]) -> Result<(Tensor, Tensor)> {
        let mut tokenizer = self.tokenizer.clone();
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            direction: PaddingDirection::Right,
            pad_to_multiple_of: None,
            pad_id: 0,
            pad_type_id: 0,
            pad_token: "[PAD]".to_string(),
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: self.max_seq_length,
                strategy: TruncationStrategy::LongestFirst,
                stride: 0,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {e}"))?;

        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Failed to tokenize texts: {e}"))?;

        let batch_size = encodings.len();
        let seq_len = encodings.first().map_or(0, |e| e.get_ids().len());

        let ids: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_ids().iter().copied())
            .collect();
        let mask: Vec<f32> = encodings
            .iter()
            .flat_map(|e| e.get_attention_mask().iter().map(|&m| m as f32))
            .collect();

        let input_ids = Tensor::from_vec(ids, (batch_size, seq_len), &self.device)
            .context("Failed to create input_ids tensor")?;
        let attention_mask = Tensor::from_vec(mask, (batch_size, seq_len), &self.device)
            .context("Failed to create attention_mask tensor")?;

        Ok((input_ids, attention_mask))
    }
}

/// Mean of token embeddings weighted by the attention mask
///
/// `hidden_states` is `[batch, seq_len, hidden]`, `attention_mask` is
/// `[batch, seq_len]`; the result is `[batch, hidden]`.
fn mean_pool(hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let mask = attention_mask
        .unsqueeze(2)?
        .broadcast_as(hidden_states.shape())?;
    let summed = hidden_states.mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
    Ok(summed.div(&counts)?)
}

/// Scale each row to unit length
fn normalize_l2(embeddings: &Tensor) -> Result<Tensor> {
    let norms = embeddings
        .sqr()?
        .sum_keepdim(1)?
        .sqrt()?
        .clamp(1e-12f32, f32::MAX)?;
    Ok(embeddings.broadcast_div(&norms)?)
}

#[async_trait]
impl EmbeddingService for Arc<BertEmbeddingModel> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let text_owned = text.to_string();
        let model = Arc::clone(self);

        tokio::task::spawn_blocking(move || {
            model
                .embed_batch_sync(&[text_owned.as_str()])?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Expected 1 embedding, got 0"))
        })
        .await
        .context("Tokio task join error")?
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let texts_owned: Vec<String> = texts.iter().map(|s| (*s).to_string()).collect();
        let model = Arc::clone(self);

        tokio::task::spawn_blocking(move || {
            let text_refs: Vec<&str> = texts_owned.iter().map(String::as_str).collect();
            model.embed_batch_sync(&text_refs)
        })
        .await
        .context("Tokio task join error")?
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
