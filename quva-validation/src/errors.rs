// Validation errors

use crate::ValidationReport;
use thiserror::Error;

/// Errors raised around a validation run.
///
/// Rule failures are never errors on their own; they are collected into a
/// [`ValidationReport`]. This type covers turning input into a record and
/// turning a failed report into a `Result`.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The value could not be serialized into a record
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The value serialized to something without named fields
    #[error("Record must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    /// At least one field failed validation
    #[error("Validation failed for {} field(s)", .0.errors().len())]
    Failed(ValidationReport),
}

impl ValidationError {
    /// The failed report, if this error carries one
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidationError::Failed(report) => Some(report),
            _ => None,
        }
    }
}
