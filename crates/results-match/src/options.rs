//! Configuration for identity resolution.

use serde::{Deserialize, Serialize};

use crate::similarity::VERY_SIMILAR_THRESHOLD;

/// Minimum pair score for an edge (default).
pub const DEFAULT_THRESHOLD: f64 = 0.75;
/// Prefix the host uses for placeholder licence ids.
pub const PROVISIONAL_PREFIX: &str = "TEMP";

/// Options for [`crate::IdentityResolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Minimum averaged score for a pair to become an edge.
    pub threshold: f64,
    /// Cut-off for the swapped-name check.
    pub very_similar_threshold: f64,
    /// External ids starting with this prefix are provisional and ignored
    /// for identity decisions.
    pub provisional_prefix: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            very_similar_threshold: VERY_SIMILAR_THRESHOLD,
            provisional_prefix: PROVISIONAL_PREFIX.to_string(),
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fewer, surer candidates.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            threshold: 0.85,
            ..Self::default()
        }
    }

    /// More candidates for manual review.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            threshold: 0.65,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_very_similar_threshold(mut self, threshold: f64) -> Self {
        self.very_similar_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_provisional_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.provisional_prefix = prefix.into();
        self
    }
}
