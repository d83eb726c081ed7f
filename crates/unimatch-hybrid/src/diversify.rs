//! Family-capped selection of the final shortlist.

use std::collections::HashMap;

use unimatch_core::types::{fold_case, ScoredCandidate};

/// Department name up to the first `(` or `-`, trimmed and case-folded.
/// "Bilgisayar Mühendisliği (İngilizce)" and "Bilgisayar Mühendisliği - İÖ"
/// share one family.
pub fn family_key(name: &str) -> String {
    let end = name.find(['(', '-']).unwrap_or(name.len());
    fold_case(name[..end].trim())
}

/// Highest combined score first; ties keep their incoming order.
pub fn sort_by_combined(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.combined.total_cmp(&a.combined));
}

/// Walk `ranked` in order, admitting a candidate only while its family has
/// fewer than `cap` admissions, until `top_k` are admitted.
pub fn diversify<F>(ranked: Vec<ScoredCandidate>, family_of: F, cap: usize, top_k: usize) -> Vec<ScoredCandidate>
where
    F: Fn(&ScoredCandidate) -> String,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut admitted = Vec::with_capacity(top_k.min(ranked.len()));
    for candidate in ranked {
        if admitted.len() >= top_k {
            break;
        }
        let count = counts.entry(family_of(&candidate)).or_insert(0);
        if *count < cap {
            *count += 1;
            admitted.push(candidate);
        }
    }
    admitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_key_cuts_at_parenthesis_or_hyphen() {
        assert_eq!(family_key("Bilgisayar Mühendisliği (İngilizce)"), "bilgisayar mühendisliği");
        assert_eq!(family_key("Bilgisayar Mühendisliği - İÖ"), "bilgisayar mühendisliği");
        assert_eq!(family_key("  Hukuk  "), "hukuk");
        assert_eq!(family_key("Tıp"), "tıp");
    }

    #[test]
    fn ties_keep_input_order() {
        let mut c = vec![ScoredCandidate::new(0, 0.5), ScoredCandidate::new(1, 0.9), ScoredCandidate::new(2, 0.5)];
        sort_by_combined(&mut c);
        let order: Vec<_> = c.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn third_member_of_a_family_is_skipped() {
        let names = ["Tıp", "Tıp (İngilizce)", "Tıp - KKTC", "Hukuk"];
        let ranked: Vec<_> = (0..4).map(|i| ScoredCandidate::new(i, 1.0 - i as f32 * 0.1)).collect();
        let out = diversify(ranked, |c| family_key(names[c.index]), 2, 10);
        let order: Vec<_> = out.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![0, 1, 3]);
    }

    #[test]
    fn stops_at_top_k() {
        let ranked: Vec<_> = (0..10).map(|i| ScoredCandidate::new(i, 0.5)).collect();
        let out = diversify(ranked, |c| c.index.to_string(), 2, 3);
        assert_eq!(out.len(), 3);
        assert!(diversify(Vec::new(), |c| c.index.to_string(), 2, 3).is_empty());
    }
}
