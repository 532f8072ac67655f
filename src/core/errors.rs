use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the enforcement core and its storage boundary.
#[derive(Error, Debug)]
pub enum PacingError {
    #[error("Brand not found: {0}")]
    BrandNotFound(Uuid),
    #[error("Campaign not found: {0}")]
    CampaignNotFound(Uuid),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Write conflict: {0}")]
    Conflict(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, PacingError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PacingError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for PacingError {
    fn from(err: std::io::Error) -> Self {
        PacingError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for PacingError {
    fn from(err: serde_json::Error) -> Self {
        PacingError::StorageError(err.to_string())
    }
}
