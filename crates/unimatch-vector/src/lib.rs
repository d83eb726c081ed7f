//! unimatch-vector
//!
//! In-memory description vectors for one program track, cosine scoring, and a
//! small on-disk cache so unchanged descriptions are not re-embedded.

pub mod cache;
pub mod index;
pub mod similarity;

pub use cache::{hash_content, EmbeddingCache};
pub use index::EmbeddingIndex;
pub use similarity::cosine_similarity;
