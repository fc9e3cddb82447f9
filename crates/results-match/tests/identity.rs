use std::collections::BTreeSet;

use results_match::{
    IdentityResolver, MatchOptions, find_duplicates, group_duplicates, normalize, similarity,
};
use results_model::{MatchReason, RiderId, RiderRecord};

fn rider(id: &str, first: &str, last: &str) -> RiderRecord {
    RiderRecord::new(RiderId::new(id).unwrap(), first, last)
}

#[test]
fn normalize_ignores_case_and_diacritics() {
    assert_eq!(normalize("Émile "), normalize("emile"));
    let once = normalize("  ÅSA   Öberg-Lind ");
    assert_eq!(normalize(&once), once);
}

#[test]
fn similarity_bounds() {
    assert_eq!(similarity("Karlsson", "Karlsson"), 1.0);
    assert_eq!(similarity("", "x"), 0.0);
}

#[test]
fn matching_authoritative_ids_always_link() {
    let riders = vec![
        rider("r1", "Anna", "Karlsson").with_external_id("10012345678"),
        rider("r2", "Petter", "Nilsson").with_external_id("10012345678"),
    ];
    let edges = find_duplicates(&riders, 0.75);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].score, 1.0);
    assert_eq!(edges[0].reasons, vec![MatchReason::SameExternalId]);
}

#[test]
fn differing_authoritative_ids_never_link() {
    let riders = vec![
        rider("r1", "Anna", "Karlsson")
            .with_club("CK Uni")
            .with_external_id("10012345678"),
        rider("r2", "Anna", "Karlsson")
            .with_club("CK Uni")
            .with_external_id("10087654321"),
    ];
    assert!(find_duplicates(&riders, 0.0).is_empty());
}

#[test]
fn one_provisional_id_falls_back_to_names() {
    let riders = vec![
        rider("r1", "Anna", "Karlsson").with_external_id("10012345678"),
        rider("r2", "Anna", "Karlsson").with_external_id("TEMP-0042"),
    ];
    let edges = find_duplicates(&riders, 0.75);
    assert_eq!(edges.len(), 1);
    assert!(edges[0].reasons.contains(&MatchReason::ExactSameName));
}

#[test]
fn shortened_first_name_with_same_club() {
    let riders = vec![
        rider("r1", "Jon", "Smith").with_club("ClubA"),
        rider("r2", "Jonathan", "Smith").with_club("ClubA"),
    ];
    let edges = find_duplicates(&riders, 0.75);
    assert_eq!(edges.len(), 1);
    assert!(edges[0].reasons.contains(&MatchReason::SimilarName));
    assert!(edges[0].reasons.iter().any(MatchReason::is_name_signal));
}

#[test]
fn swapped_names_with_same_club() {
    let riders = vec![
        rider("r1", "Anna", "Karin").with_club("CK Uni"),
        rider("r2", "Karin", "Anna").with_club("CK Uni"),
    ];
    // the swap bonus lifts the mean to about 0.52
    let resolver = IdentityResolver::new(MatchOptions::default().with_threshold(0.5));
    let edges = resolver.find_duplicates(&riders);
    assert_eq!(edges.len(), 1);
    assert!(edges[0].reasons.contains(&MatchReason::NamesMaySwapped));
    assert!(edges[0].reasons.contains(&MatchReason::SameClub));
}

#[test]
fn unrelated_riders_produce_nothing() {
    let riders = vec![
        rider("r1", "Anna", "Karlsson").with_club("CK Uni"),
        rider("r2", "Petter", "Nilsson").with_club("Team XYZ"),
    ];
    assert!(find_duplicates(&riders, 0.75).is_empty());
}

#[test]
fn edge_endpoints_are_canonical() {
    let riders = vec![rider("r9", "Erik", "Berg"), rider("r1", "Erik", "Berg")];
    let edges = find_duplicates(&riders, 0.75);
    assert_eq!(edges[0].rider_a.as_str(), "r1");
    assert_eq!(edges[0].rider_b.as_str(), "r9");
}

#[test]
fn chain_of_near_duplicates_forms_one_cluster() {
    let riders = vec![
        rider("r1", "Johan", "Andersson").with_club("CK Uni"),
        rider("r2", "Johan", "Andersson").with_club("CK Uni Göteborg"),
        rider("r3", "Johan", "Anderson").with_club("CK Uni Göteborg"),
        rider("r4", "Maria", "Lund").with_club("Team XYZ"),
        rider("r5", "Maria", "Lund"),
    ];
    let groups = IdentityResolver::default().resolve(&riders);
    assert_eq!(groups.len(), 2);

    let mut seen = BTreeSet::new();
    for group in &groups {
        assert!(group.rider_ids.len() >= 2);
        assert!(group.similarity > 0.0);
        assert!(!group.reasons.is_empty());
        for id in &group.rider_ids {
            assert!(seen.insert(id.clone()), "{id} appears in two clusters");
        }
    }
    assert!(groups[0].rider_ids.len() == 3 || groups[1].rider_ids.len() == 3);
}

#[test]
fn grouping_empty_edges_is_empty() {
    assert!(group_duplicates(&[]).is_empty());
}

#[test]
fn pair_without_any_reason_is_not_an_edge() {
    let riders = vec![
        rider("r1", "Anna", "Karlsson").with_club("CK Uni"),
        rider("r2", "Petter", "Nilsson").with_club("Team XYZ"),
    ];
    // the averaged score is above zero, but no name or club signal fired
    assert!(find_duplicates(&riders, 0.0).is_empty());
}
