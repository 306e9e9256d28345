//! Crate error types.
//!
//! Only structurally invalid input is surfaced as an error from the engine.
//! Placement conflicts are data (`SchedulingConflict`), and advisory failures
//! are recovered locally by falling back to the deterministic selector.

use thiserror::Error;

use crate::validation::ValidationError;

/// Fatal scheduling errors.
///
/// Returned before any grid work happens. A schedulable-but-conflicted
/// input never produces an error; it produces conflicts in the result.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The task list failed structural validation.
    #[error("invalid scheduling input: {}", format_validation_errors(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of an out-of-process advisor call.
///
/// These never escalate past the advisory selector; every variant triggers
/// the deterministic fallback.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Transport-level failure.
    #[error("advisor transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the advisor service.
    #[error("advisor returned status {0}")]
    Status(u16),

    /// Response body was not valid JSON for the expected shape.
    #[error("advisor response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The advisory call exceeded its deadline.
    #[error("advisor call timed out")]
    Timeout,

    /// Structurally valid response with unusable content.
    #[error("advisor response malformed: {0}")]
    Malformed(String),
}
