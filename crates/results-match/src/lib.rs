//! Rider identity resolution.
//!
//! Detects rider records that refer to the same person despite spelling
//! differences, swapped name order or missing licence ids, and groups them
//! into clusters for the host's merge workflow.

#![deny(unsafe_code)]

pub mod cluster;
pub mod engine;
pub mod lookup;
pub mod normalize;
pub mod options;
pub mod score;
pub mod similarity;

pub use cluster::{DisjointSet, group_duplicates, summarize_clusters};
pub use engine::{IdentityResolver, find_duplicates};
pub use lookup::find_existing_rider;
pub use normalize::normalize;
pub use options::{DEFAULT_THRESHOLD, MatchOptions, PROVISIONAL_PREFIX};
pub use score::{Factor, FactorScore, PairScore, PairVerdict, score_pair};
pub use similarity::{VERY_SIMILAR_THRESHOLD, are_very_similar, similarity};
