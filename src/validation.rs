//! Input validation for scheduling requests.
//!
//! Checks structural integrity of the task list before any grid work.
//! Detects:
//! - Empty task lists
//! - Duplicate task IDs
//! - Non-positive durations
//!
//! A request that fails validation is rejected as a whole; no partial
//! scheduling is attempted.

use std::collections::HashSet;

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The request contains no tasks.
    EmptyTaskList,
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task has a zero or negative duration.
    InvalidDuration,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task list for scheduling.
///
/// Checks:
/// 1. At least one task
/// 2. No duplicate task IDs
/// 3. Every duration is a positive number of minutes
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTaskList,
            "no tasks to schedule",
        ));
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.duration_minutes <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Task '{}' has non-positive duration {} minutes",
                    task.id, task.duration_minutes
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
