//! Pairwise rider scoring.
//!
//! A pair's score is the weighted mean of its factors. Name factors are
//! always present, the club factor only when both riders have a club, and
//! the two bonus factors only when they fire. Bonuses therefore raise the
//! mean towards 1.0 rather than adding on top of it.

use results_model::{MatchReason, RiderRecord};

use crate::normalize::normalize;
use crate::options::MatchOptions;
use crate::similarity::normalized_similarity;

const VERY_SIMILAR_NAME: f64 = 0.9;
const SIMILAR_NAME: f64 = 0.75;
const SAME_CLUB: f64 = 0.9;
const SIMILAR_CLUB: f64 = 0.7;

/// A signal that contributes to a pair score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    FirstName,
    LastName,
    Club,
    /// Both normalized names equal.
    ExactName,
    /// First and last name look swapped between the two records.
    SwappedName,
}

impl Factor {
    /// Weight in the mean. Bonus factors contribute `weight` to both the sum
    /// and the divisor.
    pub const fn weight(self) -> f64 {
        match self {
            Self::FirstName | Self::LastName | Self::Club => 1.0,
            Self::ExactName => 0.5,
            Self::SwappedName => 0.3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Club => "Club",
            Self::ExactName => "Exact name",
            Self::SwappedName => "Swapped name",
        }
    }
}

/// One factor's similarity value (0.0 to 1.0) before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScore {
    pub factor: Factor,
    pub value: f64,
}

/// Breakdown of a name/club comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairScore {
    pub factors: Vec<FactorScore>,
    pub reasons: Vec<MatchReason>,
}

impl PairScore {
    fn push(&mut self, factor: Factor, value: f64) {
        self.factors.push(FactorScore { factor, value });
    }

    /// Weighted mean of the factors, 0.0 when there are none.
    pub fn score(&self) -> f64 {
        let (total, weight) = self.factors.iter().fold((0.0, 0.0), |(total, weight), f| {
            (
                total + f.value * f.factor.weight(),
                weight + f.factor.weight(),
            )
        });
        if weight > 0.0 { total / weight } else { 0.0 }
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.factors
            .iter()
            .map(|f| {
                format!(
                    "{}: {:.0}% (x{})",
                    f.factor.label(),
                    f.value * 100.0,
                    f.factor.weight()
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Outcome of comparing two riders.
#[derive(Debug, Clone, PartialEq)]
pub enum PairVerdict {
    /// Both carry the same authoritative external id.
    SameExternalId,
    /// Both carry authoritative external ids and they differ.
    DifferentExternalIds,
    /// No authoritative decision; names and clubs were scored.
    Scored(PairScore),
}

/// Rider fields in normalized form, computed once per pass.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRider<'a> {
    pub record: &'a RiderRecord,
    pub first: String,
    pub last: String,
    pub club: Option<String>,
    pub authoritative_id: Option<&'a str>,
}

impl<'a> PreparedRider<'a> {
    pub fn new(record: &'a RiderRecord, options: &MatchOptions) -> Self {
        Self {
            record,
            first: normalize(&record.first_name),
            last: normalize(&record.last_name),
            club: record.club().map(normalize),
            authoritative_id: record.authoritative_id(&options.provisional_prefix),
        }
    }
}

/// Compares two riders.
pub fn score_pair(a: &RiderRecord, b: &RiderRecord, options: &MatchOptions) -> PairVerdict {
    compare(
        &PreparedRider::new(a, options),
        &PreparedRider::new(b, options),
        options,
    )
}

pub(crate) fn compare(
    a: &PreparedRider<'_>,
    b: &PreparedRider<'_>,
    options: &MatchOptions,
) -> PairVerdict {
    if let (Some(id_a), Some(id_b)) = (a.authoritative_id, b.authoritative_id) {
        return if id_a == id_b {
            PairVerdict::SameExternalId
        } else {
            PairVerdict::DifferentExternalIds
        };
    }

    let mut score = PairScore::default();

    let first = normalized_similarity(&a.first, &b.first);
    let last = normalized_similarity(&a.last, &b.last);
    score.push(Factor::FirstName, first);
    score.push(Factor::LastName, last);
    if first >= VERY_SIMILAR_NAME && last >= VERY_SIMILAR_NAME {
        score.reasons.push(MatchReason::VerySimilarNames);
    } else if first >= SIMILAR_NAME || last >= SIMILAR_NAME {
        score.reasons.push(MatchReason::SimilarName);
    }

    if let (Some(club_a), Some(club_b)) = (&a.club, &b.club) {
        let club = normalized_similarity(club_a, club_b);
        score.push(Factor::Club, club);
        if club >= SAME_CLUB {
            score.reasons.push(MatchReason::SameClub);
        } else if club >= SIMILAR_CLUB {
            score.reasons.push(MatchReason::SimilarClub);
        }
    }

    if a.first == b.first && a.last == b.last {
        score.push(Factor::ExactName, 1.0);
        score.reasons.push(MatchReason::ExactSameName);
    }

    let threshold = options.very_similar_threshold;
    if normalized_similarity(&a.first, &b.last) >= threshold
        && normalized_similarity(&a.last, &b.first) >= threshold
    {
        score.push(Factor::SwappedName, 1.0);
        score.reasons.push(MatchReason::NamesMaySwapped);
    }

    PairVerdict::Scored(score)
}

#[cfg(test)]
mod tests {
    use results_model::RiderId;

    use super::*;

    fn rider(id: &str, first: &str, last: &str, club: Option<&str>) -> RiderRecord {
        let record = RiderRecord::new(RiderId::new(id).unwrap(), first, last);
        match club {
            Some(club) => record.with_club(club),
            None => record,
        }
    }

    fn scored(verdict: PairVerdict) -> PairScore {
        match verdict {
            PairVerdict::Scored(score) => score,
            other => panic!("expected a scored pair, got {other:?}"),
        }
    }

    #[test]
    fn exact_name_bonus_is_weighted() {
        let a = rider("1", "Erik", "Berg", Some("CK Uni"));
        let b = rider("2", "Erik", "Berg", Some("Team XYZ"));
        let score = scored(score_pair(&a, &b, &MatchOptions::default()));

        assert!(score.reasons.contains(&MatchReason::ExactSameName));
        assert!(score.reasons.contains(&MatchReason::VerySimilarNames));
        let club = score
            .factors
            .iter()
            .find(|f| f.factor == Factor::Club)
            .unwrap()
            .value;
        let expected = (1.0 + 1.0 + club + 0.5) / 3.5;
        assert!((score.score() - expected).abs() < 1e-9);
    }

    #[test]
    fn club_factor_requires_both_clubs() {
        let a = rider("1", "Erik", "Berg", Some("CK Uni"));
        let b = rider("2", "Erik", "Berg", None);
        let score = scored(score_pair(&a, &b, &MatchOptions::default()));
        assert!(score.factors.iter().all(|f| f.factor != Factor::Club));
        assert_eq!(score.score(), 1.0);
    }

    #[test]
    fn swapped_names_get_a_bonus() {
        let a = rider("1", "Anna", "Karin", Some("CK Uni"));
        let b = rider("2", "Karin", "Anna", Some("CK Uni"));
        let score = scored(score_pair(&a, &b, &MatchOptions::default()));
        assert!(score.reasons.contains(&MatchReason::NamesMaySwapped));
        assert!(score.reasons.contains(&MatchReason::SameClub));
        // anna/karin differ by four edits over five characters
        let expected = (0.2 + 0.2 + 1.0 + 0.3) / 3.3;
        assert!((score.score() - expected).abs() < 1e-9);
    }

    #[test]
    fn close_club_spelling_is_similar_not_same() {
        let a = rider("1", "Erik", "Berg", Some("CK Uni"));
        let b = rider("2", "Erik", "Berg", Some("CK Unik"));
        let score = scored(score_pair(&a, &b, &MatchOptions::default()));
        assert!(score.reasons.contains(&MatchReason::SimilarClub));
        assert!(!score.reasons.contains(&MatchReason::SameClub));
        let club = score
            .factors
            .iter()
            .find(|f| f.factor == Factor::Club)
            .unwrap()
            .value;
        // one insertion over seven characters
        assert!((club - 6.0 / 7.0).abs() < 1e-9, "got {club}");
    }

    #[test]
    fn one_close_name_is_a_similar_name() {
        let a = rider("1", "Jon", "Smith", None);
        let b = rider("2", "Jonathan", "Smith", None);
        let score = scored(score_pair(&a, &b, &MatchOptions::default()));
        assert_eq!(score.reasons, vec![MatchReason::SimilarName]);
    }

    #[test]
    fn provisional_ids_fall_through_to_names() {
        let a = rider("1", "Erik", "Berg", None).with_external_id("TEMP-1");
        let b = rider("2", "Erik", "Berg", None).with_external_id("TEMP-2");
        assert!(matches!(
            score_pair(&a, &b, &MatchOptions::default()),
            PairVerdict::Scored(_)
        ));
    }

    #[test]
    fn authoritative_ids_decide() {
        let a = rider("1", "Erik", "Berg", None).with_external_id("100");
        let b = rider("2", "Erik", "Berg", None).with_external_id("200");
        let c = rider("3", "Zed", "Q", None).with_external_id("100");
        let options = MatchOptions::default();
        assert_eq!(score_pair(&a, &b, &options), PairVerdict::DifferentExternalIds);
        assert_eq!(score_pair(&a, &c, &options), PairVerdict::SameExternalId);
    }

    #[test]
    fn explain_lists_weighted_factors() {
        let a = rider("1", "Erik", "Berg", None);
        let b = rider("2", "Erik", "Berg", None);
        let explanation = scored(score_pair(&a, &b, &MatchOptions::default())).explain();
        assert!(explanation.contains("First name: 100%"));
        assert!(explanation.contains("Exact name: 100% (x0.5)"));
    }
}
