//! Duplicate rider detection.

use std::collections::BTreeSet;

use results_model::{DuplicateGroup, MatchReason, RiderRecord, SimilarityEdge};
use tracing::{debug, info, info_span};

use crate::cluster::{group_duplicates, summarize_clusters};
use crate::options::MatchOptions;
use crate::score::{PairVerdict, PreparedRider, compare};

/// Finds rider records that probably denote the same person.
///
/// Every unordered pair is compared, so a pass is quadratic in the number of
/// riders. The engine is meant to run as a batch over the active rider set
/// of a series, not per result row.
///
/// # Example
///
/// ```ignore
/// use results_match::{IdentityResolver, MatchOptions};
///
/// let resolver = IdentityResolver::new(MatchOptions::default());
/// let edges = resolver.find_duplicates(&riders);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    options: MatchOptions,
}

impl IdentityResolver {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Scores all pairs and returns the accepted edges, best first.
    ///
    /// Riders sharing an authoritative external id are always linked with
    /// score 1.0; riders with different authoritative ids are never linked.
    /// Other pairs need a score at or above the threshold and at least one
    /// reason. Edges with equal scores keep discovery order.
    pub fn find_duplicates(&self, riders: &[RiderRecord]) -> Vec<SimilarityEdge> {
        let span = info_span!(
            "find_duplicates",
            riders = riders.len(),
            threshold = self.options.threshold
        );
        let _guard = span.enter();

        let prepared: Vec<PreparedRider<'_>> = riders
            .iter()
            .map(|rider| PreparedRider::new(rider, &self.options))
            .collect();

        let mut processed = BTreeSet::new();
        let mut edges = Vec::new();
        let mut rejected_by_id = 0usize;

        for (i, a) in prepared.iter().enumerate() {
            for b in &prepared[i + 1..] {
                let (id_a, id_b) = (&a.record.id, &b.record.id);
                if id_a == id_b {
                    continue;
                }
                let key = if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) };
                if !processed.insert(key) {
                    continue;
                }

                let (score, reasons) = match compare(a, b, &self.options) {
                    PairVerdict::SameExternalId => (1.0, vec![MatchReason::SameExternalId]),
                    PairVerdict::DifferentExternalIds => {
                        rejected_by_id += 1;
                        continue;
                    }
                    PairVerdict::Scored(pair) => {
                        let score = pair.score();
                        if score < self.options.threshold || pair.reasons.is_empty() {
                            continue;
                        }
                        debug!(
                            rider_a = %id_a,
                            rider_b = %id_b,
                            score,
                            factors = %pair.explain(),
                            "candidate duplicate"
                        );
                        (score, pair.reasons)
                    }
                };

                edges.push(SimilarityEdge::new(id_a.clone(), id_b.clone(), score, reasons));
            }
        }

        edges.sort_by(|x, y| y.score.total_cmp(&x.score));
        info!(
            edges = edges.len(),
            rejected_by_external_id = rejected_by_id,
            "duplicate scan complete"
        );
        edges
    }

    /// Full pass: edges, clusters and per-cluster summaries.
    pub fn resolve(&self, riders: &[RiderRecord]) -> Vec<DuplicateGroup> {
        let edges = self.find_duplicates(riders);
        let clusters = group_duplicates(&edges);
        summarize_clusters(&edges, &clusters)
    }
}

/// Finds duplicate candidates with default options and the given threshold.
pub fn find_duplicates(riders: &[RiderRecord], threshold: f64) -> Vec<SimilarityEdge> {
    IdentityResolver::new(MatchOptions::default().with_threshold(threshold)).find_duplicates(riders)
}

#[cfg(test)]
mod tests {
    use results_model::RiderId;

    use super::*;

    fn rider(id: &str, first: &str, last: &str) -> RiderRecord {
        RiderRecord::new(RiderId::new(id).unwrap(), first, last)
    }

    #[test]
    fn resolver_keeps_its_options() {
        let resolver = IdentityResolver::new(MatchOptions::strict());
        assert_eq!(resolver.options().threshold, 0.85);
        assert_eq!(IdentityResolver::default().options(), &MatchOptions::default());
    }

    #[test]
    fn same_id_twice_is_not_a_pair() {
        let riders = vec![rider("1", "Erik", "Berg"), rider("1", "Erik", "Berg")];
        assert!(find_duplicates(&riders, 0.75).is_empty());
    }

    #[test]
    fn repeated_pair_is_reported_once() {
        let riders = vec![
            rider("1", "Erik", "Berg"),
            rider("2", "Erik", "Berg"),
            rider("1", "Erik", "Berg"),
        ];
        let edges = find_duplicates(&riders, 0.75);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn same_external_id_bypasses_threshold() {
        let riders = vec![
            rider("1", "Erik", "Berg").with_external_id("100"),
            rider("2", "Lisa", "Holm").with_external_id("100"),
        ];
        let resolver = IdentityResolver::new(MatchOptions::default().with_threshold(1.5));
        let edges = resolver.find_duplicates(&riders);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].score, 1.0);
    }

    #[test]
    fn edges_sorted_best_first() {
        let riders = vec![
            rider("1", "Jon", "Smith").with_club("ClubA"),
            rider("2", "Jonathan", "Smith").with_club("ClubA"),
            rider("3", "Erik", "Berg"),
            rider("4", "Erik", "Berg"),
        ];
        let edges = find_duplicates(&riders, 0.75);
        assert_eq!(edges.len(), 2);
        assert!(edges[0].score >= edges[1].score);
        assert_eq!(edges[0].rider_a.as_str(), "3");
    }
}
