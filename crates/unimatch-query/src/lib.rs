#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Query interpretation: admission rank and interest categories from free text.

pub mod interpreter;
pub mod matcher;
pub mod rank;

pub use interpreter::QueryInterpreter;
pub use matcher::{IntentMatcher, Signals};
pub use rank::{default_rules, RankExtractor, RankKind, RankRule};
