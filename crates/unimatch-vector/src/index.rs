use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::info;

use unimatch_core::catalog::Catalog;
use unimatch_core::traits::Embedder;
use unimatch_core::types::DeptIndex;

use crate::cache::{hash_content, EmbeddingCache};
use crate::similarity::cosine_similarity;

/// One description vector per catalog record, aligned by `DeptIndex`.
/// Read-only once built.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    vectors: Vec<Vec<f32>>,
    dim: usize,
    embedder_id: String,
}

impl EmbeddingIndex {
    /// Embed every description in `catalog`, `batch_size` at a time, reusing
    /// cached vectors when a cache is given.
    pub fn build(catalog: &Catalog, embedder: &dyn Embedder, batch_size: usize, mut cache: Option<&mut EmbeddingCache>) -> Result<Self> {
        let start = Instant::now();
        let descriptions = catalog.descriptions();
        let hashes: Vec<String> = descriptions.iter().map(|d| hash_content(d)).collect();
        let mut vectors: Vec<Option<Vec<f32>>> = hashes
            .iter()
            .map(|h| cache.as_deref().and_then(|c| c.get(h)).cloned())
            .collect();
        let misses: Vec<usize> = (0..vectors.len()).filter(|&i| vectors[i].is_none()).collect();
        info!(total = descriptions.len(), cached = descriptions.len() - misses.len(), "building embedding index");

        let pb = ProgressBar::new(misses.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} descriptions ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        for chunk in misses.chunks(batch_size.max(1)) {
            let texts: Vec<String> = chunk.iter().map(|&i| descriptions[i].clone()).collect();
            let embs = embedder.embed_batch(&texts)?;
            if embs.len() != texts.len() {
                return Err(anyhow!("embedder returned {} vectors for {} texts", embs.len(), texts.len()));
            }
            for (&i, v) in chunk.iter().zip(embs) {
                if let Some(c) = cache.as_deref_mut() {
                    c.insert(hashes[i].clone(), v.clone());
                }
                vectors[i] = Some(v);
            }
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        if let Some(c) = cache {
            c.save()?;
        }
        let vectors: Vec<Vec<f32>> = vectors.into_iter().map(Option::unwrap_or_default).collect();
        let index = Self::from_vectors(vectors, embedder.embedder_id())?;
        if !index.is_empty() && index.dim != embedder.dim() {
            return Err(anyhow!("dim mismatch: got {} expected {}", index.dim, embedder.dim()));
        }
        info!(vectors = index.len(), dim = index.dim, elapsed_ms = start.elapsed().as_millis() as u64, "embedding index ready");
        Ok(index)
    }

    /// Wrap precomputed vectors. All vectors must share one dimension.
    pub fn from_vectors(vectors: Vec<Vec<f32>>, embedder_id: &str) -> Result<Self> {
        let dim = vectors.first().map_or(0, Vec::len);
        if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(anyhow!("vector {} has dim {} expected {}", i, v.len(), dim));
        }
        Ok(Self { vectors, dim, embedder_id: embedder_id.to_string() })
    }

    pub fn len(&self) -> usize { self.vectors.len() }
    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }
    pub fn dim(&self) -> usize { self.dim }
    pub fn embedder_id(&self) -> &str { &self.embedder_id }

    pub fn vector(&self, index: DeptIndex) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    /// Vectors for an arbitrary subset of indices; unknown indices are skipped.
    pub fn vectors_for<'a>(&'a self, indices: &'a [DeptIndex]) -> impl Iterator<Item = (DeptIndex, &'a [f32])> + 'a {
        indices.iter().filter_map(move |&i| self.vector(i).map(|v| (i, v)))
    }

    /// Cosine similarity of `query` against each listed index, in input order.
    pub fn similarities(&self, query: &[f32], indices: &[DeptIndex]) -> Vec<(DeptIndex, f32)> {
        self.vectors_for(indices).map(|(i, v)| (i, cosine_similarity(query, v))).collect()
    }
}
