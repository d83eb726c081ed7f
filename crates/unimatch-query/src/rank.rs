//! Admission-rank extraction from free text.
//!
//! Rules are tried in table order and each rule looks at its first match only.
//! The matched number is widened to the whole run of digits, dots and commas
//! around it; a comma anywhere in that run makes the rule yield nothing and
//! extraction moves on to the next rule.

use regex::{Captures, Regex, RegexBuilder};

use unimatch_core::catalog::parse_rank;
use unimatch_core::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKind {
    /// "sıralamam: 45.000", "ranking 32k", "50000 sıralama". Optional unit in group 2.
    Explicit,
    /// "50 bin" means 50 000.
    Bin,
    /// "32k" means 32 000.
    Kilo,
    /// "500.000" with `.` as thousands separator.
    Dotted,
    /// A bare run of 4 to 7 digits.
    Plain,
}

pub struct RankRule {
    pub kind: RankKind,
    pub pattern: &'static str,
}

const RANK_WORD: &str = r"(?:s[ıi]ralama(?:m[ıi]z|s[ıi]|m)?|ranking|rank)";

pub fn default_rules() -> Vec<RankRule> {
    vec![
        RankRule { kind: RankKind::Explicit, pattern: r"RANKWORD\s*:?\s*(\d[\d.,]*)\s*(k\b|bin)?" },
        // "bin" takes suffixes: "50 bine yakın".
        RankRule { kind: RankKind::Bin, pattern: r"(\d[\d.,]*)\s*bin" },
        RankRule { kind: RankKind::Kilo, pattern: r"(\d[\d.,]*)\s?k\b" },
        // After the unit rules so "2025 sıralaması ... 50 bin" reads 50 000, not the year.
        RankRule { kind: RankKind::Explicit, pattern: r"(\d[\d.,]*)\s*RANKWORD" },
        RankRule { kind: RankKind::Dotted, pattern: r"(\d{1,3}(?:\.\d{3})+)" },
        RankRule { kind: RankKind::Plain, pattern: r"(\d{4,7})" },
    ]
}

pub struct RankExtractor {
    rules: Vec<(RankKind, Regex)>,
}

impl RankExtractor {
    pub fn new(rules: &[RankRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|r| {
                let pattern = r.pattern.replace("RANKWORD", RANK_WORD);
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (r.kind, re))
                    .map_err(|e| Error::InvalidConfig(format!("bad rank rule '{}': {e}", r.pattern)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// First rule producing a valid positive rank wins.
    pub fn extract(&self, text: &str) -> Option<u32> {
        self.rules.iter().find_map(|(kind, re)| {
            let caps = re.captures(text)?;
            apply(*kind, text, &caps)
        })
    }
}

fn apply(kind: RankKind, text: &str, caps: &Captures<'_>) -> Option<u32> {
    let number = caps.get(1)?;
    let token = widen(text, number.start(), number.end());
    if token.contains(',') {
        return None;
    }
    let token = token.trim_end_matches('.');
    match kind {
        RankKind::Explicit if caps.get(2).is_some() => scaled(token),
        RankKind::Explicit | RankKind::Dotted => parse_rank(token),
        RankKind::Bin | RankKind::Kilo => scaled(token),
        RankKind::Plain => {
            if (4..=7).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit()) {
                token.parse().ok().filter(|r| *r > 0)
            } else {
                None
            }
        }
    }
}

/// Grow `[start, end)` over adjacent digits, dots and commas.
fn widen(text: &str, start: usize, end: usize) -> &str {
    let is_num = |c: char| c.is_ascii_digit() || c == '.' || c == ',';
    let start = text[..start].char_indices().rev().take_while(|(_, c)| is_num(*c)).last().map_or(start, |(i, _)| i);
    let end = text[end..].char_indices().take_while(|(_, c)| is_num(*c)).last().map_or(end, |(i, c)| end + i + c.len_utf8());
    &text[start..end]
}

/// Thousands multiplier; `.` is a decimal point here ("2.5k" is 2 500).
fn scaled(token: &str) -> Option<u32> {
    let value: f64 = token.parse().ok()?;
    let rank = (value * 1000.0).trunc();
    if rank >= 1.0 && rank <= f64::from(u32::MAX) {
        Some(rank as u32)
    } else {
        None
    }
}
