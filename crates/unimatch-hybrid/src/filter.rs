//! Rank-window candidate filter.

use tracing::warn;

use unimatch_core::catalog::Catalog;
use unimatch_core::types::DeptIndex;

/// Negative or NaN tolerances become 0 (exact rank only).
pub fn sanitize_tolerance(tolerance: f64) -> f64 {
    if tolerance.is_nan() || tolerance < 0.0 {
        warn!(tolerance, "invalid rank tolerance; using 0");
        0.0
    } else {
        tolerance
    }
}

/// Inclusive `[max(1, R - Δ), R + Δ]` with `Δ = ⌊R × tolerance⌋`.
pub fn rank_window(target: u32, tolerance: f64) -> (u32, u32) {
    let delta = (f64::from(target) * sanitize_tolerance(tolerance)).floor();
    let delta = if delta >= f64::from(u32::MAX) { u32::MAX } else { delta as u32 };
    (target.saturating_sub(delta).max(1), target.saturating_add(delta))
}

/// Catalog indices inside the window around `target`, or every index when
/// there is no target.
pub fn candidate_indices(catalog: &Catalog, target: Option<u32>, tolerance: f64) -> Vec<DeptIndex> {
    let Some(target) = target else {
        return catalog.indices();
    };
    let (low, high) = rank_window(target, tolerance);
    catalog.iter().filter(|r| (low..=high).contains(&r.rank)).map(|r| r.index).collect()
}
