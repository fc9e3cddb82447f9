#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Opaque, stable rider identifier assigned by the host.
///
/// Ordering is plain string ordering; similarity edges use it to put the
/// lower id first.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct RiderId(String);

impl RiderId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRiderId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RiderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RiderId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiderId> for String {
    fn from(id: RiderId) -> Self {
        id.0
    }
}
