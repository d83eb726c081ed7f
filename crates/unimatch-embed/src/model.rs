use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XLMRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use unimatch_core::traits::Embedder;

use crate::device::select_device;
use crate::pool::masked_mean_l2;
use crate::tokenize::tokenize_batch;

/// Multilingual sentence encoder (XLM-RoBERTa family, e.g.
/// `paraphrase-multilingual-mpnet-base-v2` or `bge-m3`) with mean pooling.
pub struct EmbeddingModel {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
    pad_id: u32,
    id: String,
}

impl EmbeddingModel {
    /// Load `tokenizer.json`, `config.json` and `model.safetensors` (or
    /// `pytorch_model.bin`) from `model_dir`.
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "loading embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config_text = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: XLMRobertaConfig = serde_json::from_str(&config_text)?;
        let raw: serde_json::Value = serde_json::from_str(&config_text)?;
        let dim = raw["hidden_size"].as_u64().ok_or_else(|| anyhow!("config.json has no hidden_size"))? as usize;
        let pad_id = raw["pad_token_id"].as_u64().map_or(1, |p| p as u32);

        let vb = load_weights(model_dir, &device)?;
        let model = XLMRobertaModel::new(&config, vb)?;

        let name = model_dir.file_name().map_or_else(|| "model".to_string(), |n| n.to_string_lossy().to_string());
        let id = format!("local:{name}:d{dim}");
        info!(%id, "embedding model loaded");
        Ok(Self { model, tokenizer, device, dim, max_len, pad_id, id })
    }

    fn embed_chunk(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize_batch(&self.tokenizer, texts, self.max_len, self.pad_id, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let vectors: Vec<Vec<f32>> = pooled.to_device(&Device::Cpu)?.to_vec2()?;
        debug!(batch = texts.len(), elapsed_ms = start.elapsed().as_millis() as u64, "embedded batch");
        Ok(vectors)
    }
}

/// Prefers `model.safetensors`, read into memory; falls back to `pytorch_model.bin`.
fn load_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        let bytes = std::fs::read(&safetensors)
            .with_context(|| format!("Failed to read weights from {}", safetensors.display()))?;
        let vb = VarBuilder::from_buffered_safetensors(bytes, DType::F32, device)
            .with_context(|| format!("Invalid safetensors file {}", safetensors.display()))?;
        return Ok(vb);
    }
    let weights_path = model_dir.join("pytorch_model.bin");
    let weights = candle_core::pickle::read_all(&weights_path)
        .with_context(|| format!("Failed to read weights from {}", weights_path.display()))?;
    let weights_map: HashMap<String, Tensor> = weights.into_iter().collect();
    Ok(VarBuilder::from_tensors(weights_map, DType::F32, device))
}

impl Embedder for EmbeddingModel {
    fn embedder_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() { return Ok(Vec::new()); }
        let vectors = self.embed_chunk(texts)?;
        for v in &vectors {
            if v.len() != self.dim { return Err(anyhow!("dim mismatch: got {} expected {}", v.len(), self.dim)); }
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safetensors_are_read_into_memory() {
        let dir = tempfile::tempdir().unwrap();
        let tensors = HashMap::from([("w".to_string(), Tensor::new(&[1f32, 2., 3.], &Device::Cpu).unwrap())]);
        candle_core::safetensors::save(&tensors, dir.path().join("model.safetensors")).unwrap();

        let vb = load_weights(dir.path(), &Device::Cpu).unwrap();
        let w = vb.get(3, "w").unwrap().to_vec1::<f32>().unwrap();
        assert_eq!(w, vec![1., 2., 3.]);
    }

    #[test]
    fn corrupt_safetensors_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.safetensors"), b"not a safetensors file").unwrap();
        let err = load_weights(dir.path(), &Device::Cpu).err().unwrap();
        assert!(err.to_string().contains("Invalid safetensors"));
    }

    #[test]
    fn missing_weights_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_weights(dir.path(), &Device::Cpu).is_err());
    }
}
