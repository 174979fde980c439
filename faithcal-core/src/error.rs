//! Error types for the faithcal ecosystem.

use thiserror::Error;

/// Errors that can occur in faithcal operations.
#[derive(Error, Debug)]
pub enum FaithcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateEvent(String),

    #[error("Unknown tradition '{0}'. Expected one of: {1}")]
    UnknownTradition(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for faithcal operations.
pub type FaithcalResult<T> = Result<T, FaithcalError>;
