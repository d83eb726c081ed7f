//! Negative exclusion: drop departments tied to a category the user rejected.
//!
//! A category is rejected when one of its exclusion keywords sits right next to
//! a negation word in the query ("tıp istemiyorum", "istemiyorum tıp"). Every
//! candidate whose name contains any of that category's exclusion keywords is
//! then removed. This acts on catalog rows and is separate from the
//! interpreter's category exclusion, which only shapes the embedded text.

use tracing::debug;

use unimatch_core::catalog::Catalog;
use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::types::{fold_case, DeptIndex};

struct Rejection {
    label: String,
    phrases: Vec<String>,
    name_keywords: Vec<String>,
}

pub struct NegativeExclusion {
    rejections: Vec<Rejection>,
}

impl NegativeExclusion {
    pub fn new(taxonomy: &CategoryTaxonomy) -> Self {
        let negations: Vec<String> = taxonomy.negation_words.iter().map(|n| fold_case(n)).collect();
        let rejections = taxonomy
            .categories
            .iter()
            .filter(|c| !c.exclusion.is_empty())
            .map(|c| {
                let name_keywords: Vec<String> = c.exclusion.iter().map(|k| fold_case(k)).collect();
                let phrases = name_keywords
                    .iter()
                    .flat_map(|kw| negations.iter().flat_map(move |neg| [format!("{kw} {neg}"), format!("{neg} {kw}")]))
                    .collect();
                Rejection { label: c.label.clone(), phrases, name_keywords }
            })
            .collect();
        Self { rejections }
    }

    /// `candidates` minus every department rejected by `text`, order kept.
    pub fn apply(&self, catalog: &Catalog, candidates: Vec<DeptIndex>, text: &str) -> Vec<DeptIndex> {
        let active = self.active(&normalize(text));
        if active.is_empty() {
            return candidates;
        }
        let before = candidates.len();
        let kept: Vec<DeptIndex> = candidates
            .into_iter()
            .filter(|&i| {
                let Some(record) = catalog.get(i) else { return false };
                let name = fold_case(&record.name);
                !active.iter().any(|r| r.name_keywords.iter().any(|kw| name.contains(kw.as_str())))
            })
            .collect();
        debug!(
            rejected = ?active.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            removed = before - kept.len(),
            "negative exclusion applied"
        );
        kept
    }

    /// Rejections triggered by an already normalized text, in taxonomy order.
    fn active(&self, text: &str) -> Vec<&Rejection> {
        self.rejections.iter().filter(|r| r.phrases.iter().any(|p| text.contains(p.as_str()))).collect()
    }
}

/// Case-folded with whitespace runs collapsed to single spaces.
fn normalize(text: &str) -> String {
    fold_case(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use unimatch_core::catalog::RawRow;

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_rows(names.iter().map(|n| RawRow {
            name: Some((*n).to_string()),
            description: Some("açıklama".into()),
            rank: Some("10.000".into()),
            ..RawRow::default()
        }))
        .0
    }

    #[test]
    fn keyword_then_negation() {
        let c = catalog(&["Tıp", "Hemşirelik", "Bilgisayar Mühendisliği"]);
        let ex = NegativeExclusion::new(&CategoryTaxonomy::default());
        assert_eq!(ex.apply(&c, c.indices(), "Tıp istemiyorum"), vec![2]);
    }

    #[test]
    fn negation_then_keyword() {
        let c = catalog(&["Makine Mühendisliği", "Hukuk"]);
        let ex = NegativeExclusion::new(&CategoryTaxonomy::default());
        let labels: Vec<_> =
            ex.active(&normalize("ben   istemiyorum  mühendislik falan")).into_iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["mühendislik"]);
        assert_eq!(ex.apply(&c, c.indices(), "istemiyorum mühendislik"), vec![1]);
    }

    #[test]
    fn no_negation_no_change() {
        let c = catalog(&["Tıp", "Hukuk"]);
        let ex = NegativeExclusion::new(&CategoryTaxonomy::default());
        assert_eq!(ex.apply(&c, vec![1, 0], "tıp okumak istiyorum"), vec![1, 0]);
        assert!(ex.active(&normalize("tıp okumak istiyorum")).is_empty());
    }

    #[test]
    fn only_listed_candidates_are_considered() {
        let c = catalog(&["Tıp", "Hukuk", "Diş Hekimliği"]);
        let ex = NegativeExclusion::new(&CategoryTaxonomy::default());
        assert_eq!(ex.apply(&c, vec![1, 2], "sağlık sevmiyorum"), vec![1]);
    }
}
