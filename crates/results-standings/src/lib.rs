//! Points tables and series standings.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod points;
pub mod rank;

pub use aggregate::{Standings, aggregate, aggregate_individual, aggregate_teams};
pub use error::{PointsConfigError, Result};
pub use points::{PointSystem, PointsTable, points_for};
pub use rank::{Ranked, assign_competition_ranks};
