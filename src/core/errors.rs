//! Unified error type for core, storage, and config layers.

use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::DateSpanError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Adjustment not found: {0}")]
    AdjustmentNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Estimate not found: {0}")]
    EstimateNotFound(Uuid),
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<DateSpanError> for TrackerError {
    fn from(err: DateSpanError) -> Self {
        TrackerError::Validation(err.to_string())
    }
}
