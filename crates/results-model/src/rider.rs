//! Rider records and the host-provided rider lookup.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::ids::RiderId;

/// A rider as stored by the host. Treated as immutable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderRecord {
    pub id: RiderId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub club: Option<String>,
    /// Federation licence id. Values starting with the provisional prefix
    /// are placeholders and never prove identity.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl RiderRecord {
    pub fn new(id: RiderId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            club: None,
            external_id: None,
        }
    }

    #[must_use]
    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Club name, or `None` when missing or blank.
    pub fn club(&self) -> Option<&str> {
        non_blank(self.club.as_deref())
    }

    /// External id, or `None` when missing or blank.
    pub fn external_id(&self) -> Option<&str> {
        non_blank(self.external_id.as_deref())
    }

    /// External id when it is present and not marked provisional.
    pub fn authoritative_id(&self, provisional_prefix: &str) -> Option<&str> {
        self.external_id()
            .filter(|id| provisional_prefix.is_empty() || !id.starts_with(provisional_prefix))
    }

    /// "First Last", as shown to users.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolves rider ids to records. Implemented by the host's storage layer;
/// in-memory maps and slices work out of the box.
pub trait RiderLookup {
    fn rider(&self, id: &RiderId) -> Option<&RiderRecord>;
}

impl RiderLookup for BTreeMap<RiderId, RiderRecord> {
    fn rider(&self, id: &RiderId) -> Option<&RiderRecord> {
        self.get(id)
    }
}

impl<S: std::hash::BuildHasher> RiderLookup for HashMap<RiderId, RiderRecord, S> {
    fn rider(&self, id: &RiderId) -> Option<&RiderRecord> {
        self.get(id)
    }
}

impl RiderLookup for [RiderRecord] {
    fn rider(&self, id: &RiderId) -> Option<&RiderRecord> {
        self.iter().find(|r| &r.id == id)
    }
}

impl RiderLookup for Vec<RiderRecord> {
    fn rider(&self, id: &RiderId) -> Option<&RiderRecord> {
        self.as_slice().rider(id)
    }
}
