use std::collections::{BTreeMap, HashMap};

use results_model::{
    DuplicateCluster, ModelError, ResultTuple, RiderId, RiderLookup, RiderRecord, StandingRow,
};

fn rider(id: &str, first: &str, last: &str) -> RiderRecord {
    RiderRecord::new(RiderId::new(id).unwrap(), first, last)
}

#[test]
fn rider_id_rejects_blank_values() {
    assert_eq!(
        RiderId::new("   "),
        Err(ModelError::InvalidRiderId("   ".to_string()))
    );
    assert_eq!(RiderId::new(" r-1 ").unwrap().as_str(), "r-1");
}

#[test]
fn lookup_works_for_maps_and_slices() {
    let riders = vec![
        rider("r1", "Anna", "Karin").with_club("CK Uni"),
        rider("r2", "Erik", "Berg"),
    ];
    let target = RiderId::new("r2").unwrap();

    assert_eq!(riders.as_slice().rider(&target).unwrap().last_name, "Berg");

    let by_id: BTreeMap<RiderId, RiderRecord> =
        riders.iter().map(|r| (r.id.clone(), r.clone())).collect();
    assert_eq!(by_id.rider(&target).unwrap().first_name, "Erik");

    let hashed: HashMap<RiderId, RiderRecord> =
        riders.into_iter().map(|r| (r.id.clone(), r)).collect();
    assert!(hashed.rider(&RiderId::new("missing").unwrap()).is_none());
}

#[test]
fn display_name_trims_parts() {
    assert_eq!(rider("r1", " Anna ", "Karin ").display_name(), "Anna Karin");
}

#[test]
fn records_round_trip_through_json() {
    let result = ResultTuple {
        rider_id: RiderId::new("r1").unwrap(),
        class_name: "H21".to_string(),
        position: 3,
        points: 425,
        event_id: "e1".to_string(),
        valid: true,
    };
    let json = serde_json::to_string(&result).expect("serialize result");
    let round: ResultTuple = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round, result);

    let row = StandingRow {
        rider_id: RiderId::new("r1").unwrap(),
        class_name: "H21".to_string(),
        total_points: 925,
        event_count: 2,
        rank: 1,
        events: vec![],
    };
    let value = serde_json::to_value(&row).expect("serialize row");
    assert_eq!(value["total_points"], 925);
    assert_eq!(value["rider_id"], "r1");
}

#[test]
fn rider_without_optional_fields_deserializes() {
    let json = r#"{"id":"r9","first_name":"Lisa","last_name":"Holm"}"#;
    let record: RiderRecord = serde_json::from_str(json).expect("deserialize rider");
    assert_eq!(record.club(), None);
    assert_eq!(record.external_id(), None);
}

#[test]
fn cluster_membership() {
    let cluster = DuplicateCluster {
        rider_ids: ["a", "b"]
            .into_iter()
            .map(|v| RiderId::new(v).unwrap())
            .collect(),
    };
    assert_eq!(cluster.len(), 2);
    assert!(cluster.contains(&RiderId::new("a").unwrap()));
}

#[test]
fn blank_rider_id_fails_to_deserialize() {
    let json = r#"{"id":"  ","first_name":"Lisa","last_name":"Holm"}"#;
    let error = serde_json::from_str::<RiderRecord>(json).unwrap_err();
    assert!(error.to_string().contains("rider id must not be blank"), "{error}");
}
