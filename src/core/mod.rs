// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use filters::{is_available, is_candidate, is_excluded};
pub use matcher::{MatchResult, Matcher};
pub use scoring::{calculate_compatibility, score, ScoringError};
pub use similarity::{jaccard_similarity, overlap_fraction, shared_tokens};
