//! Free text to [`Query`]: target rank plus interest categories.

use tracing::debug;

use unimatch_core::error::Result;
use unimatch_core::taxonomy::CategoryTaxonomy;
use unimatch_core::types::{fold_case, Query};

use crate::matcher::IntentMatcher;
use crate::rank::{default_rules, RankExtractor, RankRule};

pub struct QueryInterpreter {
    matcher: IntentMatcher,
    ranks: RankExtractor,
    fallback_label: String,
}

impl QueryInterpreter {
    pub fn new(taxonomy: &CategoryTaxonomy) -> Result<Self> {
        Self::with_rank_rules(taxonomy, &default_rules())
    }

    pub fn with_rank_rules(taxonomy: &CategoryTaxonomy, rules: &[RankRule]) -> Result<Self> {
        Ok(Self {
            matcher: IntentMatcher::new(taxonomy)?,
            ranks: RankExtractor::new(rules)?,
            fallback_label: taxonomy.fallback_label.clone(),
        })
    }

    pub fn interpret(&self, text: &str) -> Query {
        let folded = fold_case(text);
        let target_rank = self.ranks.extract(&folded);

        let mut interest_tags = Vec::new();
        let mut excluded = Vec::new();
        let mut positive = Vec::new();
        for (label, signals) in self.matcher.scan(&folded) {
            if signals.negative {
                excluded.push(label.to_string());
                continue;
            }
            if signals.positive {
                positive.push(label.to_string());
            }
            if signals.included() {
                interest_tags.push(label.to_string());
            }
        }
        if interest_tags.is_empty() && !self.fallback_label.is_empty() {
            interest_tags.push(self.fallback_label.clone());
        }

        debug!(?interest_tags, ?excluded, ?positive, ?target_rank, "query interpreted");
        Query { text: text.to_string(), interest_tags, target_rank, excluded, positive }
    }

    pub fn extract_rank(&self, text: &str) -> Option<u32> {
        self.ranks.extract(&fold_case(text))
    }
}
