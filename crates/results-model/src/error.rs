use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("rider id must not be blank: {0:?}")]
    InvalidRiderId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
