//! One generic matcher for every category's intent rules.

use regex::{Regex, RegexBuilder};

use unimatch_core::error::{Error, Result};
use unimatch_core::taxonomy::{CategoryTaxonomy, IntentKind};

/// What fired for one category on one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub negative: bool,
    pub positive: bool,
    pub career: bool,
    /// A core keyword occurs anywhere in the text.
    pub keyword: bool,
}

impl Signals {
    pub fn included(&self) -> bool {
        !self.negative && (self.positive || self.career || self.keyword)
    }
}

struct CompiledCategory {
    label: String,
    keywords: Vec<String>,
    rules: Vec<(IntentKind, Regex)>,
}

impl CompiledCategory {
    fn fires(&self, intent: IntentKind, text: &str) -> bool {
        self.rules.iter().any(|(kind, re)| *kind == intent && re.is_match(text))
    }

    /// Negative intent is checked first; a rejected category evaluates nothing else.
    fn signals(&self, text: &str) -> Signals {
        if self.fires(IntentKind::Negative, text) {
            return Signals { negative: true, ..Signals::default() };
        }
        Signals {
            negative: false,
            positive: self.fires(IntentKind::Positive, text),
            career: self.fires(IntentKind::Career, text),
            keyword: self.keywords.iter().any(|k| text.contains(k.as_str())),
        }
    }
}

pub struct IntentMatcher {
    categories: Vec<CompiledCategory>,
}

impl IntentMatcher {
    pub fn new(taxonomy: &CategoryTaxonomy) -> Result<Self> {
        let categories = taxonomy
            .categories
            .iter()
            .map(|cat| {
                let rules = cat
                    .rules
                    .iter()
                    .map(|rule| {
                        RegexBuilder::new(&rule.pattern)
                            .case_insensitive(true)
                            .build()
                            .map(|re| (rule.intent, re))
                            .map_err(|e| {
                                Error::InvalidConfig(format!("category '{}': bad pattern '{}': {e}", cat.label, rule.pattern))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledCategory {
                    label: cat.label.clone(),
                    keywords: cat.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    rules,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Signals per category, in taxonomy order. `text` must already be case-folded.
    pub fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (&'a str, Signals)> + 'a {
        self.categories.iter().map(move |c| (c.label.as_str(), c.signals(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unimatch_core::taxonomy::{Category, IntentRule};

    fn tiny() -> CategoryTaxonomy {
        CategoryTaxonomy {
            categories: vec![Category {
                label: "music".into(),
                keywords: vec!["music".into(), "guitar".into()],
                expansion: vec!["music".into()],
                exclusion: vec![],
                rules: vec![
                    IntentRule::near(IntentKind::Negative, "music", "hate"),
                    IntentRule::near(IntentKind::Career, "musician", "become"),
                ],
            }],
            negation_words: vec!["hate".into()],
            fallback_label: "general".into(),
        }
    }

    #[test]
    fn negative_suppresses_everything_else() {
        let m = IntentMatcher::new(&tiny()).expect("compile");
        let (label, s) = m.scan("i really music hate, guitar too").next().expect("one category");
        assert_eq!(label, "music");
        assert!(s.negative);
        assert!(!s.keyword);
        assert!(!s.included());
    }

    #[test]
    fn keyword_alone_includes() {
        let m = IntentMatcher::new(&tiny()).expect("compile");
        let s = m.scan("i play guitar").next().map(|(_, s)| s).expect("signals");
        assert!(s.keyword && s.included());
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        let mut tax = tiny();
        tax.categories[0].rules.push(IntentRule::new(IntentKind::Positive, "(unclosed"));
        assert!(matches!(IntentMatcher::new(&tax), Err(Error::InvalidConfig(_))));
    }
}
