//! Deterministic keyword bonus on top of semantic similarity.
//!
//! Each interest token that names a category (its label or a core keyword)
//! pulls in that category's whole expansion list. Every expansion keyword
//! found in a department's name or description adds `keyword_increment`;
//! keywords of positively stated categories add `positive_increment` on top
//! when stacking is enabled.

use unimatch_core::catalog::Catalog;
use unimatch_core::config::EngineSettings;
use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::types::{fold_case, ScoredCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionKeyword {
    pub keyword: String,
    pub positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostWeights {
    pub keyword_increment: f32,
    pub positive_increment: f32,
    pub stack_positive: bool,
}

impl From<&EngineSettings> for BoostWeights {
    fn from(s: &EngineSettings) -> Self {
        Self {
            keyword_increment: s.keyword_increment,
            positive_increment: s.positive_increment,
            stack_positive: s.stack_positive_boost,
        }
    }
}

/// Expansion keywords for a comma separated interest string, deduplicated in
/// taxonomy order. A keyword shared by several categories is positive if any
/// of them is in `positive`.
pub fn expansion_set(taxonomy: &CategoryTaxonomy, interest_text: &str, positive: &[String]) -> Vec<ExpansionKeyword> {
    let tokens: Vec<String> = interest_text.split(',').map(|t| fold_case(t.trim())).filter(|t| !t.is_empty()).collect();
    let mut out: Vec<ExpansionKeyword> = Vec::new();
    for category in &taxonomy.categories {
        if !tokens.iter().any(|t| category.recognises(t)) {
            continue;
        }
        let is_positive = positive.iter().any(|p| *p == category.label);
        for kw in &category.expansion {
            let kw = fold_case(kw);
            match out.iter_mut().find(|e| e.keyword == kw) {
                Some(existing) => existing.positive |= is_positive,
                None => out.push(ExpansionKeyword { keyword: kw, positive: is_positive }),
            }
        }
    }
    out
}

/// Bonus for one case-folded text.
pub fn boost_for(text: &str, expansion: &[ExpansionKeyword], weights: BoostWeights) -> f32 {
    expansion
        .iter()
        .filter(|e| text.contains(e.keyword.as_str()))
        .map(|e| {
            if e.positive && weights.stack_positive {
                weights.keyword_increment + weights.positive_increment
            } else {
                weights.keyword_increment
            }
        })
        .sum()
}

/// Add the bonus to every candidate; similarity is left untouched.
pub fn apply_boost(catalog: &Catalog, candidates: &mut [ScoredCandidate], expansion: &[ExpansionKeyword], weights: BoostWeights) {
    if expansion.is_empty() {
        return;
    }
    for candidate in candidates.iter_mut() {
        if let Some(record) = catalog.get(candidate.index) {
            candidate.add_boost(boost_for(&record.search_text(), expansion, weights));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: BoostWeights = BoostWeights { keyword_increment: 0.1, positive_increment: 0.1, stack_positive: true };

    #[test]
    fn label_token_pulls_in_expansion() {
        let tax = CategoryTaxonomy::default();
        let exp = expansion_set(&tax, "teknoloji", &[]);
        assert!(exp.iter().any(|e| e.keyword == "yazılım"));
        assert!(exp.iter().any(|e| e.keyword == "robotik"));
        assert!(exp.iter().all(|e| !e.positive));
    }

    #[test]
    fn fallback_label_expands_to_nothing() {
        let tax = CategoryTaxonomy::default();
        assert!(expansion_set(&tax, "genel", &[]).is_empty());
        assert!(expansion_set(&tax, "", &[]).is_empty());
    }

    #[test]
    fn shared_keywords_appear_once() {
        let tax = CategoryTaxonomy::default();
        let exp = expansion_set(&tax, "finans, işletme", &["işletme".to_string()]);
        let finans: Vec<_> = exp.iter().filter(|e| e.keyword == "finans").collect();
        assert_eq!(finans.len(), 1);
        assert!(finans[0].positive);
    }

    #[test]
    fn each_match_adds_an_increment() {
        let exp = vec![
            ExpansionKeyword { keyword: "yazılım".into(), positive: false },
            ExpansionKeyword { keyword: "veri".into(), positive: true },
        ];
        assert!((boost_for("yazılım ve veri bilimi", &exp, W) - 0.3).abs() < 1e-6);
        let flat = BoostWeights { stack_positive: false, ..W };
        assert!((boost_for("yazılım ve veri bilimi", &exp, flat) - 0.2).abs() < 1e-6);
        assert_eq!(boost_for("tarih", &exp, W), 0.0);
    }
}
