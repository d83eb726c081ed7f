//! Domain types shared by the loader, the interpreter and the engine.

use serde::{Deserialize, Serialize};

/// Position of a department inside its track's catalog. Zero-based, gap-free.
pub type DeptIndex = usize;

/// One university department offered on a program track.
///
/// - `index`: position in the catalog, also the row of its description vector
/// - `rank`: admission rank, lower is more selective, always `>= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub index: DeptIndex,
    pub name: String,
    pub university: String,
    pub city: String,
    pub description: String,
    pub rank: u32,
}

impl DepartmentRecord {
    /// Name and description, lowercased, as scanned by the keyword booster.
    pub fn search_text(&self) -> String {
        fold_case(&format!("{} {}", self.name, self.description))
    }
}

/// Structured reading of a free-text request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    /// Detected category labels in taxonomy order, or the fallback label alone.
    pub interest_tags: Vec<String>,
    pub target_rank: Option<u32>,
    /// Categories the user explicitly rejected.
    pub excluded: Vec<String>,
    /// Categories stated with positive sentiment; these earn the stacked boost.
    pub positive: Vec<String>,
}

impl Query {
    /// The text that gets embedded for semantic scoring.
    pub fn interest_text(&self) -> String {
        self.interest_tags.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub index: DeptIndex,
    pub similarity: f32,
    pub keyword_boost: f32,
    pub combined: f32,
}

impl ScoredCandidate {
    pub fn new(index: DeptIndex, similarity: f32) -> Self {
        Self { index, similarity, keyword_boost: 0.0, combined: similarity }
    }

    pub fn add_boost(&mut self, boost: f32) {
        self.keyword_boost += boost;
        self.combined = self.similarity + self.keyword_boost;
    }
}

/// A shortlisted department as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub university: String,
    pub city: String,
    pub rank: u32,
    pub similarity_score: f64,
    pub keyword_boost: f64,
    pub combined_score: f64,
    pub match_percentage: u8,
    pub description_preview: String,
}

impl Recommendation {
    pub fn from_candidate(record: &DepartmentRecord, candidate: &ScoredCandidate, preview_chars: usize) -> Self {
        Self {
            name: record.name.clone(),
            university: record.university.clone(),
            city: record.city.clone(),
            rank: record.rank,
            similarity_score: round4(candidate.similarity),
            keyword_boost: round4(candidate.keyword_boost),
            combined_score: round4(candidate.combined),
            match_percentage: match_percentage(candidate.combined),
            description_preview: preview(&record.description, preview_chars),
        }
    }

    /// Human readable breakdown of why this department was shortlisted.
    pub fn explain(&self) -> String {
        format!(
            "Department: {}\nUniversity: {} ({})\nAdmission rank: {}\n\nSimilarity: {:.4}\nKeyword bonus: {:.4}\nMatch: {}%\n\nDescription: {}",
            self.name,
            self.university,
            self.city,
            self.rank,
            self.similarity_score,
            self.keyword_boost,
            self.match_percentage,
            self.description_preview,
        )
    }
}

/// Summary returned by the multi-track system's health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub loaded_track_count: usize,
    pub available_tracks: Vec<String>,
}

fn round4(x: f32) -> f64 {
    (f64::from(x) * 10_000.0).round() / 10_000.0
}

fn match_percentage(combined: f32) -> u8 {
    let pct = (round4(combined) * 100.0 + 1e-9).floor();
    if pct.is_nan() || pct <= 0.0 {
        0
    } else if pct >= 100.0 {
        100
    } else {
        // In range (0, 100) after the checks above.
        pct as u8
    }
}

/// Lowercase with Turkish dotted/dotless I handled, so "SAĞLIK" folds to "sağlık".
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'I' => 'ı',
            'İ' => 'i',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// First `max_chars` characters followed by an ellipsis.
pub fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}
