//! Multi-track registry.
//!
//! Each configured program track gets its own engine, built on first use (or
//! by [`RecommendationSystem::warm_up`]) and cached for the life of the
//! process. The map lock is only held to fetch a track's slot; the slot's
//! `OnceCell` makes sure at most one build per track runs at a time.
//! A track whose dataset is missing or empty is remembered as unavailable;
//! an embedding failure is not remembered, so the next request retries.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use unimatch_core::catalog::CatalogLoader;
use unimatch_core::config::{resolve_with_base, ColumnNames, Config, EngineSettings};
use unimatch_core::error::{Error, Result};
use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::traits::Embedder;
use unimatch_core::types::{HealthStatus, Recommendation};
use unimatch_query::QueryInterpreter;
use unimatch_vector::EmbeddingCache;

use crate::engine::RecommendationEngine;

/// Everything a system needs besides the embedder.
#[derive(Debug, Clone)]
pub struct SystemOptions {
    pub tracks: BTreeMap<String, PathBuf>,
    pub columns: ColumnNames,
    pub taxonomy: CategoryTaxonomy,
    pub engine: EngineSettings,
    pub batch_size: usize,
    pub cache_dir: Option<PathBuf>,
}

impl SystemOptions {
    pub fn new(tracks: BTreeMap<String, PathBuf>) -> Self {
        Self {
            tracks,
            columns: ColumnNames::default(),
            taxonomy: CategoryTaxonomy::default(),
            engine: EngineSettings::default(),
            batch_size: 32,
            cache_dir: None,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let embedding = config.embedding()?;
        Ok(Self {
            tracks: config.tracks()?,
            columns: config.columns()?,
            taxonomy: config.taxonomy()?,
            engine: config.engine()?,
            batch_size: embedding.batch_size,
            cache_dir: embedding.cache_dir.map(|d| resolve_with_base(config.base_dir(), d)),
        })
    }
}

enum TrackSlot {
    Ready(Arc<RecommendationEngine>),
    Unavailable(String),
}

pub struct RecommendationSystem {
    options: SystemOptions,
    embedder: Arc<dyn Embedder>,
    loader: CatalogLoader,
    slots: Mutex<HashMap<String, Arc<OnceCell<TrackSlot>>>>,
}

impl RecommendationSystem {
    pub fn new(options: SystemOptions, embedder: Arc<dyn Embedder>) -> Result<Self> {
        // Surface taxonomy pattern errors now rather than on the first request.
        QueryInterpreter::new(&options.taxonomy)?;
        info!(tracks = options.tracks.len(), embedder = embedder.embedder_id(), "recommendation system configured");
        Ok(Self {
            loader: CatalogLoader::new(options.columns.clone()),
            options,
            embedder,
            slots: Mutex::new(HashMap::new()),
        })
    }

    /// Read settings from `config` and load the configured embedder.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let options = SystemOptions::from_config(config)?;
        let embedder = unimatch_embed::load_embedder(&config.embedding()?, config.base_dir())?;
        Ok(Self::new(options, embedder)?)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.options.engine
    }

    /// Configured tracks, sorted, minus those already known to be unavailable.
    /// Tracks not built yet are listed.
    pub fn get_available_programs(&self) -> Vec<String> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        self.available_in(&slots)
    }

    /// The engine for `track`, building it on first use.
    pub fn engine(&self, track: &str) -> Result<Arc<RecommendationEngine>> {
        let Some(path) = self.options.tracks.get(track) else {
            return Err(Error::UnknownTrack { track: track.to_string(), available: self.get_available_programs() });
        };
        let cell = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(track.to_string()).or_default())
        };
        match cell.get_or_try_init(|| self.build_slot(track, path))? {
            TrackSlot::Ready(engine) => Ok(Arc::clone(engine)),
            TrackSlot::Unavailable(reason) => {
                Err(Error::TrackUnavailable { track: track.to_string(), reason: reason.clone() })
            }
        }
    }

    pub fn recommend(&self, track: &str, text: &str, top_k: usize, tolerance: f64) -> Result<Vec<Recommendation>> {
        self.engine(track)?.recommend(text, top_k, tolerance)
    }

    /// Build every configured track now; returns how many are usable.
    pub fn warm_up(&self) -> usize {
        let mut ready = 0;
        for track in self.options.tracks.keys() {
            match self.engine(track) {
                Ok(engine) => {
                    info!(track = %track, departments = engine.len(), "track ready");
                    ready += 1;
                }
                Err(e) => warn!(track = %track, error = %e, "track not available"),
            }
        }
        ready
    }

    pub fn health_check(&self) -> HealthStatus {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let built: Vec<&TrackSlot> = slots.values().filter_map(|cell| cell.get()).collect();
        let loaded = built.iter().filter(|s| matches!(s, TrackSlot::Ready(_))).count();
        let status = if loaded == built.len() { "healthy" } else { "degraded" };
        HealthStatus {
            status: status.to_string(),
            loaded_track_count: loaded,
            available_tracks: self.available_in(&slots),
        }
    }

    fn available_in(&self, slots: &HashMap<String, Arc<OnceCell<TrackSlot>>>) -> Vec<String> {
        self.options
            .tracks
            .keys()
            .filter(|track| !matches!(slots.get(*track).and_then(|cell| cell.get()), Some(TrackSlot::Unavailable(_))))
            .cloned()
            .collect()
    }

    fn build_slot(&self, track: &str, path: &std::path::Path) -> Result<TrackSlot> {
        let (catalog, report) = match self.loader.load_path(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(track, path = %path.display(), error = %e, "track dataset could not be loaded");
                return Ok(TrackSlot::Unavailable(e.to_string()));
            }
        };
        if catalog.is_empty() {
            warn!(track, rows = report.rows_read, dropped = report.dropped(), "track has no usable departments");
            return Ok(TrackSlot::Unavailable(format!("no usable departments in {}", path.display())));
        }

        let mut cache = self.options.cache_dir.as_ref().and_then(|dir| {
            EmbeddingCache::open(&dir.join(track), self.embedder.embedder_id())
                .map_err(|e| warn!(track, error = %e, "embedding cache disabled"))
                .ok()
        });
        let engine = RecommendationEngine::build(
            catalog,
            Arc::clone(&self.embedder),
            self.options.taxonomy.clone(),
            self.options.engine.clone(),
            self.options.batch_size,
            cache.as_mut(),
        )?;
        info!(track, departments = engine.len(), dropped = report.dropped(), "track engine built");
        Ok(TrackSlot::Ready(Arc::new(engine)))
    }
}
