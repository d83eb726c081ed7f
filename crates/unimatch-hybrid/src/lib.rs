//! unimatch-hybrid
//!
//! The recommendation pipeline: rank-window filtering, negative exclusion,
//! semantic scoring, keyword boosting and family diversification, wrapped in
//! a per-track engine and a multi-track registry.

pub mod boost;
pub mod diversify;
pub mod engine;
pub mod exclusion;
pub mod filter;
pub mod scorer;
pub mod system;

pub use engine::RecommendationEngine;
pub use system::{RecommendationSystem, SystemOptions};
