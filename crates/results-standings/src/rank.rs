//! Competition ranking ("1, 1, 3").

use results_model::{StandingRow, TeamStandingRow};

/// A row that can be ranked by its points total.
pub trait Ranked {
    fn total_points(&self) -> u64;
    fn set_rank(&mut self, rank: usize);
}

impl Ranked for StandingRow {
    fn total_points(&self) -> u64 {
        self.total_points
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

impl Ranked for TeamStandingRow {
    fn total_points(&self) -> u64 {
        self.total_points
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

/// Ranks rows that are already sorted best first.
///
/// A row shares its predecessor's rank only when the totals are equal;
/// otherwise its rank is its 1-based position. Secondary sort keys never
/// make rows share a rank.
pub fn assign_competition_ranks<T: Ranked>(rows: &mut [T]) {
    let mut previous: Option<(u64, usize)> = None;
    for (index, row) in rows.iter_mut().enumerate() {
        let points = row.total_points();
        let rank = match previous {
            Some((previous_points, previous_rank)) if previous_points == points => previous_rank,
            _ => index + 1,
        };
        row.set_rank(rank);
        previous = Some((points, rank));
    }
}
