//! File-backed embedding cache keyed by `(content_hash, embedder_id)`.
//!
//! The cache is consulted before calling the embedder and written through on
//! misses, so restarting a track does not re-embed unchanged descriptions.
//! One JSON file per embedder id; writes go to a temp file and are renamed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn hash_content(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    embedder_id: String,
    entries: HashMap<String, Vec<f32>>,
}

#[derive(Debug)]
pub struct EmbeddingCache {
    path: PathBuf,
    file: CacheFile,
    dirty: bool,
}

impl EmbeddingCache {
    /// Open (or start) the cache for `embedder_id` under `dir`. A corrupt or
    /// foreign cache file is ignored and will be overwritten on save.
    pub fn open(dir: &Path, embedder_id: &str) -> Result<Self> {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create cache dir {}", dir.display()))?;
        let file_name: String = embedder_id.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' }).collect();
        let path = dir.join(format!("{file_name}.json"));
        let fresh = || CacheFile { embedder_id: embedder_id.to_string(), entries: HashMap::new() };
        let file = if path.exists() {
            match std::fs::read_to_string(&path).map_err(anyhow::Error::from).and_then(|s| Ok(serde_json::from_str::<CacheFile>(&s)?)) {
                Ok(f) if f.embedder_id == embedder_id => f,
                Ok(_) => {
                    warn!(path = %path.display(), "embedding cache belongs to another embedder; starting fresh");
                    fresh()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable embedding cache; starting fresh");
                    fresh()
                }
            }
        } else {
            fresh()
        };
        debug!(path = %path.display(), entries = file.entries.len(), "embedding cache opened");
        Ok(Self { path, file, dirty: false })
    }

    pub fn get(&self, content_hash: &str) -> Option<&Vec<f32>> {
        self.file.entries.get(content_hash)
    }

    pub fn insert(&mut self, content_hash: String, vector: Vec<f32>) {
        self.file.entries.insert(content_hash, vector);
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist if anything changed since open/last save.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let data = serde_json::to_string(&self.file)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, data).with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_entries_are_visible_after_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cache = EmbeddingCache::open(tmp.path(), "fake:xxhash:d4").unwrap();
        cache.insert(hash_content("tıp"), vec![0.1, 0.2, 0.3, 0.4]);
        cache.save().unwrap();

        let reopened = EmbeddingCache::open(tmp.path(), "fake:xxhash:d4").unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get(&hash_content("tıp")), Some(&vec![0.1, 0.2, 0.3, 0.4]));
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = EmbeddingCache::open(tmp.path(), "m").unwrap();
        std::fs::write(cache.path(), "{not json").unwrap();
        let reopened = EmbeddingCache::open(tmp.path(), "m").unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        assert_eq!(hash_content("hukuk"), hash_content("hukuk"));
        assert_ne!(hash_content("hukuk"), hash_content("Hukuk"));
    }
}
