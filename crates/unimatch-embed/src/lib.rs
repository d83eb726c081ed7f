//! unimatch-embed
//!
//! Local text embedding for department descriptions and query interests:
//! a candle XLM-RoBERTa encoder with masked mean pooling, plus a hashing
//! embedder selected by `embedding.use_fake` or `APP_USE_FAKE_EMBEDDINGS=1`.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use unimatch_core::config::{resolve_with_base, EmbeddingSettings};
use unimatch_core::traits::Embedder;

pub mod device;
pub mod fake;
pub mod model;
pub mod pool;
pub mod tokenize;

pub use fake::FakeEmbedder;
pub use model::EmbeddingModel;
pub use pool::masked_mean_l2;

const DEFAULT_MODEL_DIR: &str = "models/paraphrase-multilingual-mpnet-base-v2";

pub fn use_fake_from_env() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Build the embedder described by `settings`; relative model paths resolve against `base_dir`.
pub fn load_embedder(settings: &EmbeddingSettings, base_dir: &Path) -> Result<Arc<dyn Embedder>> {
    if settings.use_fake || use_fake_from_env() {
        info!(dim = settings.fake_dim, "using FakeEmbedder");
        return Ok(Arc::new(FakeEmbedder::new(settings.fake_dim)));
    }
    let dir = resolve_model_dir(settings, base_dir)?;
    Ok(Arc::new(EmbeddingModel::load(&dir, settings.max_len)?))
}

fn resolve_model_dir(settings: &EmbeddingSettings, base_dir: &Path) -> Result<PathBuf> {
    let candidates = settings
        .model_dir
        .iter()
        .cloned()
        .chain(std::env::var("APP_MODEL_DIR").ok())
        .chain(std::env::var("MODEL_DIR").ok())
        .chain(std::iter::once(DEFAULT_MODEL_DIR.to_string()));
    for candidate in candidates {
        let p = resolve_with_base(base_dir, &candidate);
        if p.exists() {
            info!(dir = %p.display(), "using model dir");
            return Ok(p);
        }
    }
    Err(anyhow!("Could not locate an embedding model directory (set embedding.model_dir or APP_MODEL_DIR)"))
}
