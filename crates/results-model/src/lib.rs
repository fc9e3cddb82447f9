pub mod error;
pub mod ids;
pub mod matching;
pub mod result;
pub mod rider;
pub mod standings;

pub use error::{ModelError, Result};
pub use ids::RiderId;
pub use matching::{DuplicateCluster, DuplicateGroup, MatchReason, SimilarityEdge};
pub use result::ResultTuple;
pub use rider::{RiderLookup, RiderRecord};
pub use standings::{EventScore, StandingRow, TeamStandingRow};
