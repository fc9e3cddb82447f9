use serde::{Deserialize, Serialize};

use crate::ids::RiderId;

/// One rider's finish in one class of one event.
///
/// `points` were computed by the host at import time. Only tuples with
/// `valid == true` count towards standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTuple {
    pub rider_id: RiderId,
    pub class_name: String,
    pub position: u32,
    pub points: u32,
    pub event_id: String,
    pub valid: bool,
}
