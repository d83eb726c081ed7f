//! Department catalog loading.
//!
//! Rows come from a CSV dataset per program track. A row survives only with a
//! non-empty name, a non-empty description and a parseable admission rank;
//! everything else is counted and dropped, never reported as a failure.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ColumnNames;
use crate::error::{Error, Result};
use crate::types::{DepartmentRecord, DeptIndex};

/// One row as read from the dataset, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: Option<String>,
    pub university: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub rank: Option<String>,
}

/// Why rows were dropped while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub missing_text: usize,
    pub bad_rank: usize,
    pub malformed: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.missing_text + self.bad_rank + self.malformed
    }
}

/// Immutable, zero-based list of departments for one track.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<DepartmentRecord>,
}

impl Catalog {
    /// Validate raw rows into a catalog, re-indexing survivors without gaps.
    pub fn from_rows<I>(rows: I) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut report = LoadReport::default();
        let mut records = Vec::new();
        for row in rows {
            report.rows_read += 1;
            let (Some(name), Some(description)) = (non_empty(row.name), non_empty(row.description)) else {
                report.missing_text += 1;
                continue;
            };
            let Some(rank) = row.rank.as_deref().and_then(parse_rank) else {
                report.bad_rank += 1;
                continue;
            };
            records.push(DepartmentRecord {
                index: records.len(),
                name,
                university: non_empty(row.university).unwrap_or_default(),
                city: non_empty(row.city).unwrap_or_default(),
                description,
                rank,
            });
        }
        (Self { records }, report)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: DeptIndex) -> Option<&DepartmentRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[DepartmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DepartmentRecord> {
        self.records.iter()
    }

    pub fn indices(&self) -> Vec<DeptIndex> {
        (0..self.records.len()).collect()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.description.clone()).collect()
    }
}

/// Reads department CSVs using configurable header names.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    columns: ColumnNames,
}

impl CatalogLoader {
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    pub fn load_path(&self, path: &Path) -> Result<(Catalog, LoadReport)> {
        info!(path = %path.display(), "loading department catalog");
        let file = std::fs::File::open(path)?;
        self.load_reader(file)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(Catalog, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let position = |column: &str| headers.iter().position(|h| h.trim().trim_start_matches('\u{feff}') == column);
        let require = |column: &str| {
            position(column).ok_or_else(|| Error::InvalidConfig(format!("dataset has no '{column}' column")))
        };
        let name_at = require(&self.columns.name)?;
        let description_at = require(&self.columns.description)?;
        let rank_at = require(&self.columns.rank)?;
        let university_at = position(&self.columns.university);
        let city_at = position(&self.columns.city);

        let mut malformed = 0usize;
        let rows: Vec<RawRow> = reader
            .records()
            .filter_map(|record| match record {
                Ok(record) => {
                    let field = |at: Option<usize>| at.and_then(|i| record.get(i)).map(str::to_string);
                    Some(RawRow {
                        name: field(Some(name_at)),
                        university: field(university_at),
                        city: field(city_at),
                        description: field(Some(description_at)),
                        rank: field(Some(rank_at)),
                    })
                }
                Err(e) => {
                    debug!(error = %e, "skipping malformed dataset row");
                    malformed += 1;
                    None
                }
            })
            .collect();

        let (catalog, mut report) = Catalog::from_rows(rows);
        report.rows_read += malformed;
        report.malformed = malformed;
        info!(
            kept = catalog.len(),
            read = report.rows_read,
            missing_text = report.missing_text,
            bad_rank = report.bad_rank,
            malformed = report.malformed,
            "catalog loaded"
        );
        Ok((catalog, report))
    }
}

/// Parse a locale-formatted admission rank.
///
/// `.` is a thousands separator (a rank never has a fractional part), any `,`
/// makes the value ambiguous and rejects it, and zero is not a rank.
pub fn parse_rank(raw: &str) -> Option<u32> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'').collect();
    if cleaned.is_empty() || cleaned.contains(',') {
        return None;
    }
    let digits: String = cleaned.chars().filter(|c| *c != '.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|r| *r > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
