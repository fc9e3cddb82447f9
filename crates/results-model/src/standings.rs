//! Ranked standings rows. Derived and ephemeral; the host may persist them.

use serde::{Deserialize, Serialize};

use crate::ids::RiderId;

/// One counted result inside a standings row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScore {
    pub event_id: String,
    pub position: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rider_id: RiderId,
    pub class_name: String,
    pub total_points: u64,
    pub event_count: usize,
    /// Competition rank (1, 1, 3, ...). Zero until ranked.
    pub rank: usize,
    pub events: Vec<EventScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStandingRow {
    /// The club name, as stored on the riders.
    pub team_name: String,
    pub class_name: String,
    pub total_points: u64,
    /// Distinct riders who scored for the team in this class.
    pub rider_count: usize,
    pub rank: usize,
}
