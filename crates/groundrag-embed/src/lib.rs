//! groundrag-embed
//!
//! Local sentence embeddings on candle. [`EmbeddingModel`] runs
//! `all-MiniLM-L6-v2` (BERT, 384 dims) from a model directory holding
//! `config.json`, `tokenizer.json` and either `model.safetensors` or
//! `pytorch_model.bin`. [`FakeEmbedder`] is a deterministic feature-hash
//! stand-in for tests and offline development.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

pub use groundrag_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::masked_mean_l2;

pub const MINILM_DIM: usize = 384;
const MAX_LEN: usize = 256;

pub struct EmbeddingModel {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
}

impl EmbeddingModel {
    pub fn new() -> Result<Self> {
        Self::from_dir(&resolve_model_dir()?)
    }

    pub fn from_dir(model_dir: &Path) -> Result<Self> {
        let device = device::select_device();
        info!(dir = %model_dir.display(), "loading MiniLM embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config: BertConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let safetensors = model_dir.join("model.safetensors");
        let vb = if safetensors.exists() {
            // SAFETY: the weights file is not modified while the model is alive.
            unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, &device)? }
        } else {
            let weights_path = model_dir.join("pytorch_model.bin");
            let weights = candle_core::pickle::read_all(&weights_path)
                .map_err(|e| anyhow!("Failed to read weights from {}: {}", weights_path.display(), e))?;
            VarBuilder::from_tensors(weights.into_iter().collect(), DType::F32, &device)
        };
        let model = BertModel::load(vb, &config)?;
        info!(dim = config.hidden_size, "embedding model loaded");
        Ok(Self { model, tokenizer, device, dim: config.hidden_size })
    }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let input = tokenize::tokenize_on_device(&self.tokenizer, text, MAX_LEN, &self.device)?;
        let hidden = self.model.forward(&input.input_ids, &input.token_type_ids, Some(&input.attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &input.attention_mask)?;
        let emb: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if emb.len() != self.dim {
            return Err(anyhow!("expected {} dims, model produced {}", self.dim, emb.len()));
        }
        let ms = start.elapsed().as_millis();
        if ms > 250 {
            warn!(ms, "slow embedding");
        } else {
            debug!(ms, "embedded");
        }
        Ok(emb)
    }
}

impl Embedder for EmbeddingModel {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        MAX_LEN
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}

/// Hashes lowercased word tokens into a fixed number of buckets and
/// L2-normalizes. Texts sharing words land close together, which is enough
/// signal for tests and offline runs without model weights.
pub struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        let mut v = vec![0f32; self.dim];
        let lower = text.to_lowercase();
        let tokens = lower.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty());
        for token in tokens {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            v[idx] += 0.5 + ((h >> 32) as u32 as f32) / (u32::MAX as f32);
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for FakeEmbedder {
    fn default() -> Self {
        Self::new(MINILM_DIM)
    }
}

impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        MAX_LEN
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The fake embedder when `APP_USE_FAKE_EMBEDDINGS` is set, the local model otherwise.
pub fn get_default_embedder() -> Result<Box<dyn Embedder>> {
    if use_fake_embeddings() {
        info!("using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::default()));
    }
    Ok(Box::new(EmbeddingModel::new()?))
}

fn resolve_model_dir() -> Result<PathBuf> {
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = PathBuf::from(&dir);
            if p.exists() {
                debug!(var, dir = %p.display(), "model dir from environment");
                return Ok(p);
            }
            warn!(var, dir = %p.display(), "model dir does not exist, ignoring");
        }
    }
    for candidate in ["models/all-MiniLM-L6-v2", "../models/all-MiniLM-L6-v2"] {
        let p = Path::new(candidate);
        if p.exists() {
            return Ok(p.to_path_buf());
        }
    }
    Err(anyhow!(
        "Could not locate the all-MiniLM-L6-v2 model directory (set APP_MODEL_DIR, or APP_USE_FAKE_EMBEDDINGS=1 for offline runs)"
    ))
}
