//! Outputs of an identity resolution pass.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::RiderId;

/// Why two rider records were considered the same person.
///
/// Purely diagnostic; the score has already been computed when a reason is
/// attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchReason {
    #[serde(rename = "Same external ID")]
    SameExternalId,
    #[serde(rename = "Very similar names")]
    VerySimilarNames,
    #[serde(rename = "Similar name")]
    SimilarName,
    #[serde(rename = "Same club")]
    SameClub,
    #[serde(rename = "Similar club")]
    SimilarClub,
    #[serde(rename = "Exact same name")]
    ExactSameName,
    #[serde(rename = "Names may be swapped")]
    NamesMaySwapped,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameExternalId => "Same external ID",
            Self::VerySimilarNames => "Very similar names",
            Self::SimilarName => "Similar name",
            Self::SameClub => "Same club",
            Self::SimilarClub => "Similar club",
            Self::ExactSameName => "Exact same name",
            Self::NamesMaySwapped => "Names may be swapped",
        }
    }

    /// True for reasons that come from name comparison.
    pub fn is_name_signal(&self) -> bool {
        matches!(
            self,
            Self::VerySimilarNames | Self::SimilarName | Self::ExactSameName | Self::NamesMaySwapped
        )
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored link between two riders believed to be the same person.
///
/// `rider_a` is always the lower id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub rider_a: RiderId,
    pub rider_b: RiderId,
    /// Similarity in `[0, 1]`, higher is more similar.
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl SimilarityEdge {
    /// Builds an edge with the endpoints in canonical order.
    pub fn new(first: RiderId, second: RiderId, score: f64, reasons: Vec<MatchReason>) -> Self {
        let (rider_a, rider_b) = if second < first {
            (second, first)
        } else {
            (first, second)
        };
        Self {
            rider_a,
            rider_b,
            score,
            reasons,
        }
    }

    pub fn contains(&self, id: &RiderId) -> bool {
        &self.rider_a == id || &self.rider_b == id
    }
}

/// Rider ids transitively linked by similarity edges. Always at least two ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCluster {
    pub rider_ids: BTreeSet<RiderId>,
}

impl DuplicateCluster {
    pub fn len(&self) -> usize {
        self.rider_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rider_ids.is_empty()
    }

    pub fn contains(&self, id: &RiderId) -> bool {
        self.rider_ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiderId> {
        self.rider_ids.iter()
    }
}

/// A cluster together with what the review screen shows about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub rider_ids: BTreeSet<RiderId>,
    /// Highest edge score inside the cluster.
    pub similarity: f64,
    /// Union of the reasons of every edge inside the cluster, first seen first.
    pub reasons: Vec<MatchReason>,
}
