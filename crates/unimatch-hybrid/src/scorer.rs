//! Semantic similarity between the interest text and candidate descriptions.

use tracing::debug;

use unimatch_core::error::{Error, Result};
use unimatch_core::traits::Embedder;
use unimatch_core::types::{DeptIndex, ScoredCandidate};
use unimatch_vector::EmbeddingIndex;

/// Embed `interest_text` once and score it against each candidate's stored
/// vector. An empty interest text scores nothing.
pub fn score_candidates(
    embedder: &dyn Embedder,
    index: &EmbeddingIndex,
    interest_text: &str,
    candidates: &[DeptIndex],
) -> Result<Vec<ScoredCandidate>> {
    if interest_text.trim().is_empty() || candidates.is_empty() {
        return Ok(Vec::new());
    }
    let query = embedder.embed_one(interest_text).map_err(|e| Error::embedding(&e))?;
    if query.len() != index.dim() {
        return Err(Error::Embedding(format!(
            "query vector has dim {} but the index holds dim {} ({})",
            query.len(),
            index.dim(),
            index.embedder_id()
        )));
    }
    let scored: Vec<ScoredCandidate> =
        index.similarities(&query, candidates).into_iter().map(|(i, sim)| ScoredCandidate::new(i, sim)).collect();
    debug!(candidates = candidates.len(), scored = scored.len(), "similarity scored");
    Ok(scored)
}
