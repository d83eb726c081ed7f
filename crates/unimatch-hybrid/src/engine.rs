use std::sync::Arc;

use tracing::{debug, info};

use unimatch_core::catalog::Catalog;
use unimatch_core::config::EngineSettings;
use unimatch_core::error::{Error, Result};
use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::traits::Embedder;
use unimatch_core::types::{Query, Recommendation, ScoredCandidate};
use unimatch_query::QueryInterpreter;
use unimatch_vector::{EmbeddingCache, EmbeddingIndex};

use crate::boost::{apply_boost, expansion_set, BoostWeights};
use crate::diversify::{diversify, family_key, sort_by_combined};
use crate::exclusion::NegativeExclusion;
use crate::filter::candidate_indices;
use crate::scorer::score_candidates;

/// Recommendation pipeline for a single program track.
///
/// Catalog and index are read-only after construction, so one engine serves
/// concurrent requests without locking.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    index: Arc<EmbeddingIndex>,
    embedder: Arc<dyn Embedder>,
    taxonomy: Arc<CategoryTaxonomy>,
    interpreter: QueryInterpreter,
    exclusion: NegativeExclusion,
    settings: EngineSettings,
}

impl RecommendationEngine {
    /// Embed the whole catalog and assemble the engine.
    pub fn build(
        catalog: Catalog,
        embedder: Arc<dyn Embedder>,
        taxonomy: CategoryTaxonomy,
        settings: EngineSettings,
        batch_size: usize,
        cache: Option<&mut EmbeddingCache>,
    ) -> Result<Self> {
        let index = EmbeddingIndex::build(&catalog, embedder.as_ref(), batch_size, cache).map_err(|e| Error::embedding(&e))?;
        Self::from_parts(catalog, index, embedder, taxonomy, settings)
    }

    /// Assemble from a prebuilt index; the index must be aligned with the catalog.
    pub fn from_parts(
        catalog: Catalog,
        index: EmbeddingIndex,
        embedder: Arc<dyn Embedder>,
        taxonomy: CategoryTaxonomy,
        settings: EngineSettings,
    ) -> Result<Self> {
        if index.len() != catalog.len() {
            return Err(Error::InvalidConfig(format!(
                "embedding index has {} vectors for {} departments",
                index.len(),
                catalog.len()
            )));
        }
        let interpreter = QueryInterpreter::new(&taxonomy)?;
        let exclusion = NegativeExclusion::new(&taxonomy);
        info!(departments = catalog.len(), embedder = index.embedder_id(), "recommendation engine ready");
        Ok(Self {
            catalog: Arc::new(catalog),
            index: Arc::new(index),
            embedder,
            taxonomy: Arc::new(taxonomy),
            interpreter,
            exclusion,
            settings,
        })
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn interpret(&self, text: &str) -> Query {
        self.interpreter.interpret(text)
    }

    /// Shortlist at most `top_k` departments for `text`.
    ///
    /// Interpret, filter by rank window, drop rejected departments, score,
    /// boost, sort, then cap per family. Any stage that leaves nothing ends
    /// the request with an empty list.
    pub fn recommend(&self, text: &str, top_k: usize, tolerance: f64) -> Result<Vec<Recommendation>> {
        let query = self.interpreter.interpret(text);
        let interest_text = query.interest_text();
        if top_k == 0 || interest_text.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = candidate_indices(&self.catalog, query.target_rank, tolerance);
        debug!(target_rank = ?query.target_rank, tolerance, candidates = candidates.len(), "rank window applied");
        let candidates = self.exclusion.apply(&self.catalog, candidates, text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored = score_candidates(self.embedder.as_ref(), &self.index, &interest_text, &candidates)?;
        let expansion = expansion_set(&self.taxonomy, &interest_text, &query.positive);
        apply_boost(&self.catalog, &mut scored, &expansion, BoostWeights::from(&self.settings));
        sort_by_combined(&mut scored);

        let family_of = |c: &ScoredCandidate| {
            self.catalog.get(c.index).map(|r| family_key(&r.name)).unwrap_or_default()
        };
        let admitted = diversify(scored, family_of, self.settings.family_cap, top_k);
        debug!(admitted = admitted.len(), expansion = expansion.len(), "shortlist ready");

        Ok(admitted
            .iter()
            .filter_map(|c| {
                self.catalog.get(c.index).map(|r| Recommendation::from_candidate(r, c, self.settings.preview_chars))
            })
            .collect())
    }

    /// `recommend` with the configured default `top_k` and tolerance.
    pub fn recommend_default(&self, text: &str) -> Result<Vec<Recommendation>> {
        self.recommend(text, self.settings.default_top_k, self.settings.default_tolerance)
    }
}
