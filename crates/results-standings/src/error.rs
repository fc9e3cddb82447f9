#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PointsConfigError {
    #[error("failed to read points config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse points config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("point system name must not be blank")]
    EmptySystemName,

    #[error("point system name {name} is reserved for the series custom table")]
    ReservedSystemName { name: String },

    #[error("point system {system} increases at position {position}")]
    NotMonotonic { system: String, position: usize },
}

impl PointsConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PointsConfigError>;
