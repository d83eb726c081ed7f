//! Lightweight configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_ENGINE__FAMILY_CAP=3`). Provides
//! helpers to expand `~` and `${VAR}` and to resolve relative paths against a
//! known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::taxonomy::CategoryTaxonomy;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: env::current_dir()? };
        config.validate()?;
        Ok(config)
    }

    /// Build a config from TOML text; relative paths resolve against `base_dir`.
    pub fn from_toml_str(toml: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let config = Self { figment: Figment::new().merge(Toml::string(toml)), base_dir: base_dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Like [`Config::get`], but an absent key yields `T::default()`.
    pub fn get_or_default<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.figment.find_value(key).is_err() {
            return Ok(T::default());
        }
        self.get(key)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn engine(&self) -> anyhow::Result<EngineSettings> {
        self.get_or_default("engine")
    }

    pub fn embedding(&self) -> anyhow::Result<EmbeddingSettings> {
        self.get_or_default("embedding")
    }

    pub fn columns(&self) -> anyhow::Result<ColumnNames> {
        self.get_or_default("columns")
    }

    /// Track identifier -> dataset path, resolved against the base directory.
    pub fn tracks(&self) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        let raw: BTreeMap<String, String> = self.get_or_default("tracks")?;
        Ok(raw.into_iter().map(|(name, p)| (name, resolve_with_base(&self.base_dir, p))).collect())
    }

    /// Built-in taxonomy unless `taxonomy_path` points at a replacement file.
    pub fn taxonomy(&self) -> anyhow::Result<CategoryTaxonomy> {
        let path: Option<String> = self.get_or_default("taxonomy_path")?;
        match path {
            None => Ok(CategoryTaxonomy::default()),
            Some(p) => {
                let path = resolve_with_base(&self.base_dir, p);
                Figment::new()
                    .merge(Toml::file(&path))
                    .extract()
                    .map_err(|e| anyhow::anyhow!("Failed to load taxonomy from {}: {}", path.display(), e))
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let engine = self.engine()?;
        if !(0.0..=1.0).contains(&engine.default_tolerance) {
            anyhow::bail!("engine.default_tolerance must be within [0, 1], got {}", engine.default_tolerance);
        }
        if engine.keyword_increment < 0.0 || engine.positive_increment < 0.0 {
            anyhow::bail!("engine keyword increments must not be negative");
        }
        if engine.family_cap == 0 {
            anyhow::bail!("engine.family_cap must be at least 1");
        }
        let embedding = self.embedding()?;
        if embedding.batch_size == 0 {
            anyhow::bail!("embedding.batch_size must be at least 1");
        }
        Ok(())
    }
}

/// Tunables for the recommendation pipeline.
///
/// The keyword increments are product knobs: `keyword_increment` is added per
/// matching expansion keyword, and when `stack_positive_boost` is set a keyword
/// belonging to a positively stated category earns `positive_increment` on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub default_top_k: usize,
    pub default_tolerance: f64,
    pub preview_chars: usize,
    pub family_cap: usize,
    pub keyword_increment: f32,
    pub positive_increment: f32,
    pub stack_positive_boost: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_top_k: 6,
            default_tolerance: 0.20,
            preview_chars: 150,
            family_cap: 2,
            keyword_increment: 0.1,
            positive_increment: 0.1,
            stack_positive_boost: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub model_dir: Option<String>,
    pub use_fake: bool,
    pub fake_dim: usize,
    pub max_len: usize,
    pub batch_size: usize,
    pub cache_dir: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self { model_dir: None, use_fake: false, fake_dim: 384, max_len: 128, batch_size: 32, cache_dir: None }
    }
}

/// CSV header names of the department datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub name: String,
    pub university: String,
    pub city: String,
    pub description: String,
    pub rank: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "bolum_adi".into(),
            university: "Universite".into(),
            city: "Sehir".into(),
            description: "Aciklama".into(),
            rank: "2025_Taban_Sıralama".into(),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
