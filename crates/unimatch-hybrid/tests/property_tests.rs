use std::collections::HashMap;

use proptest::prelude::*;

use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::types::ScoredCandidate;
use unimatch_hybrid::boost::{boost_for, expansion_set, BoostWeights};
use unimatch_hybrid::diversify::{diversify, sort_by_combined};

const WEIGHTS: BoostWeights = BoostWeights { keyword_increment: 0.1, positive_increment: 0.1, stack_positive: true };

proptest! {
    #[test]
    fn diversifier_caps_families_and_keeps_order(
        items in prop::collection::vec((0u8..5, -1.0f32..1.0), 0..40),
        top_k in 0usize..12,
        cap in 1usize..4,
    ) {
        let mut ranked: Vec<ScoredCandidate> =
            items.iter().enumerate().map(|(i, (_, s))| ScoredCandidate::new(i, *s)).collect();
        sort_by_combined(&mut ranked);
        let family = |c: &ScoredCandidate| items[c.index].0.to_string();
        let out = diversify(ranked.clone(), family, cap, top_k);

        prop_assert!(out.len() <= top_k);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for c in &out {
            *counts.entry(family(c)).or_default() += 1;
        }
        prop_assert!(counts.values().all(|&n| n <= cap));

        let positions: Vec<usize> = out
            .iter()
            .map(|c| ranked.iter().position(|r| r.index == c.index).unwrap_or(usize::MAX))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(out.windows(2).all(|w| w[0].combined >= w[1].combined));
    }

    #[test]
    fn adding_a_keyword_never_lowers_the_boost(base in "[a-zçğıöşü ]{0,60}", pick in 0usize..64, positive in any::<bool>()) {
        let tax = CategoryTaxonomy::default();
        let positives = if positive { vec!["teknoloji".to_string()] } else { Vec::new() };
        let expansion = expansion_set(&tax, "teknoloji, sağlık", &positives);
        prop_assume!(!expansion.is_empty());
        let keyword = &expansion[pick % expansion.len()].keyword;

        let before = boost_for(&base, &expansion, WEIGHTS);
        let after = boost_for(&format!("{base} {keyword}"), &expansion, WEIGHTS);
        prop_assert!(after >= before);
    }
}
