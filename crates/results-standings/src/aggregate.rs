//! Series standings from validated results.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use results_model::{
    EventScore, ResultTuple, RiderId, RiderLookup, RiderRecord, StandingRow, TeamStandingRow,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::rank::assign_competition_ranks;

/// Ranked individual and (for team series) team standings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// All classes ranked together: points, then events counted.
    pub individual: Vec<StandingRow>,
    /// `None` unless the series is team based.
    pub team: Option<Vec<TeamStandingRow>>,
}

impl Standings {
    pub fn is_empty(&self) -> bool {
        self.individual.is_empty() && self.team.as_ref().is_none_or(Vec::is_empty)
    }

    /// Class names present, in order.
    pub fn class_names(&self) -> BTreeSet<&str> {
        self.individual
            .iter()
            .map(|row| row.class_name.as_str())
            .collect()
    }

    /// Standings ranked independently inside each class.
    pub fn by_class(&self) -> BTreeMap<String, Vec<StandingRow>> {
        let mut classes: BTreeMap<String, Vec<StandingRow>> = BTreeMap::new();
        for row in &self.individual {
            classes
                .entry(row.class_name.clone())
                .or_default()
                .push(row.clone());
        }
        for rows in classes.values_mut() {
            assign_competition_ranks(rows);
        }
        classes
    }

    /// One class, ranked on its own. Empty when the class has no results.
    pub fn class(&self, class_name: &str) -> Vec<StandingRow> {
        let mut rows: Vec<StandingRow> = self
            .individual
            .iter()
            .filter(|row| row.class_name == class_name)
            .cloned()
            .collect();
        assign_competition_ranks(&mut rows);
        rows
    }

    /// Flat table for export: ordered by class name, then points and events
    /// counted, carrying each row's rank within its class.
    pub fn export_rows(&self) -> Vec<StandingRow> {
        self.by_class().into_values().flatten().collect()
    }

    /// Team standings ranked independently inside each class.
    pub fn team_by_class(&self) -> BTreeMap<String, Vec<TeamStandingRow>> {
        let mut classes: BTreeMap<String, Vec<TeamStandingRow>> = BTreeMap::new();
        for row in self.team.iter().flatten() {
            classes
                .entry(row.class_name.clone())
                .or_default()
                .push(row.clone());
        }
        for rows in classes.values_mut() {
            assign_competition_ranks(rows);
        }
        classes
    }
}

/// Aggregates valid results into ranked standings.
///
/// Invalid tuples are ignored. Team standings group by the rider's club and
/// class; results of riders without a club (or unknown to `riders`) only
/// count individually.
pub fn aggregate<L>(results: &[ResultTuple], riders: &L, team_based: bool) -> Standings
where
    L: RiderLookup + ?Sized,
{
    let span = info_span!("aggregate", results = results.len(), team_based);
    let _guard = span.enter();

    let individual = aggregate_individual(results);
    let team = team_based.then(|| aggregate_teams(results, riders));
    info!(
        riders = individual.len(),
        teams = team.as_ref().map_or(0, Vec::len),
        "standings aggregated"
    );
    Standings { individual, team }
}

/// Individual standings across all classes.
pub fn aggregate_individual(results: &[ResultTuple]) -> Vec<StandingRow> {
    let mut slots: BTreeMap<(&RiderId, &str), usize> = BTreeMap::new();
    let mut rows: Vec<StandingRow> = Vec::new();
    let mut skipped = 0usize;

    for result in results {
        if !result.valid {
            skipped += 1;
            continue;
        }
        let slot = *slots
            .entry((&result.rider_id, result.class_name.as_str()))
            .or_insert_with(|| {
                rows.push(StandingRow {
                    rider_id: result.rider_id.clone(),
                    class_name: result.class_name.clone(),
                    total_points: 0,
                    event_count: 0,
                    rank: 0,
                    events: Vec::new(),
                });
                rows.len() - 1
            });
        let row = &mut rows[slot];
        row.total_points += u64::from(result.points);
        row.event_count += 1;
        row.events.push(EventScore {
            event_id: result.event_id.clone(),
            position: result.position,
            points: result.points,
        });
    }

    rows.sort_by(compare_individual);
    assign_competition_ranks(&mut rows);
    debug!(rows = rows.len(), skipped_invalid = skipped, "individual standings");
    rows
}

/// Team standings: points summed per (club, class), counting distinct riders.
pub fn aggregate_teams<L>(results: &[ResultTuple], riders: &L) -> Vec<TeamStandingRow>
where
    L: RiderLookup + ?Sized,
{
    let mut teams: BTreeMap<(&str, &str), (u64, BTreeSet<&RiderId>)> = BTreeMap::new();
    let mut without_club = 0usize;

    for result in results.iter().filter(|r| r.valid) {
        let Some(club) = riders.rider(&result.rider_id).and_then(RiderRecord::club) else {
            without_club += 1;
            continue;
        };
        let (points, members) = teams
            .entry((club, result.class_name.as_str()))
            .or_default();
        *points += u64::from(result.points);
        members.insert(&result.rider_id);
    }

    let mut rows: Vec<TeamStandingRow> = teams
        .into_iter()
        .map(|((club, class_name), (total_points, members))| TeamStandingRow {
            team_name: club.to_string(),
            class_name: class_name.to_string(),
            total_points,
            rider_count: members.len(),
            rank: 0,
        })
        .collect();

    rows.sort_by(compare_team);
    assign_competition_ranks(&mut rows);
    debug!(
        rows = rows.len(),
        results_without_club = without_club,
        "team standings"
    );
    rows
}

fn compare_individual(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.event_count.cmp(&a.event_count))
        .then_with(|| a.class_name.cmp(&b.class_name))
        .then_with(|| a.rider_id.cmp(&b.rider_id))
}

fn compare_team(a: &TeamStandingRow, b: &TeamStandingRow) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.class_name.cmp(&b.class_name))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> RiderId {
        RiderId::new(value).unwrap()
    }

    fn result(rider: &str, class_name: &str, event: &str, points: u32) -> ResultTuple {
        ResultTuple {
            rider_id: id(rider),
            class_name: class_name.to_string(),
            position: 1,
            points,
            event_id: event.to_string(),
            valid: true,
        }
    }

    #[test]
    fn event_count_breaks_ties_without_sharing_rank() {
        let results = vec![
            result("a", "H21", "e1", 100),
            result("b", "H21", "e1", 60),
            result("b", "H21", "e2", 40),
        ];
        let rows = aggregate_individual(&results);
        assert_eq!(rows[0].rider_id, id("b"));
        assert_eq!(rows[0].event_count, 2);
        // equal totals share the rank even though events differ
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 1);
    }

    #[test]
    fn invalid_results_are_ignored() {
        let mut dropped = result("a", "H21", "e1", 500);
        dropped.valid = false;
        let results = vec![dropped, result("a", "H21", "e2", 10)];
        let rows = aggregate_individual(&results);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_points, 10);
        assert_eq!(rows[0].events.len(), 1);
    }

    #[test]
    fn team_rows_skip_riders_without_club() {
        let riders = vec![
            RiderRecord::new(id("a"), "Anna", "Karin").with_club("CK Uni"),
            RiderRecord::new(id("b"), "Erik", "Berg"),
        ];
        let results = vec![result("a", "H21", "e1", 100), result("b", "H21", "e1", 90)];
        let teams = aggregate_teams(&results, riders.as_slice());
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_name, "CK Uni");
        assert_eq!(teams[0].total_points, 100);
    }

    #[test]
    fn individual_only_series_has_no_team_table() {
        let riders: Vec<RiderRecord> = Vec::new();
        let standings = aggregate(&[result("a", "H21", "e1", 100)], &riders, false);
        assert!(standings.team.is_none());
        assert_eq!(standings.individual.len(), 1);
    }
}
