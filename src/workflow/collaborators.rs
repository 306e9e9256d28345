//! External collaborator interfaces for the scheduling workflow.
//!
//! The controller owns sequencing and the retry bound; everything that
//! touches the outside world (task extraction, conflict resolution with a
//! human, calendar write-back, downstream advisories) sits behind these
//! traits. The crate ships no concrete implementations beyond test
//! doubles; callers plug in their own adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Preferences, ScheduledTask, SchedulingConflict, SchedulingResult, Task,
};

/// A collaborator-side failure.
///
/// Non-fatal for integration and advisory collaborators (recorded on the
/// run); fatal only for decomposition, which the workflow cannot proceed
/// without.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    /// Creates an error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result alias for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Produces the task list for a run (the decomposition step).
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns the tasks to schedule.
    async fn decompose(&self) -> CollaboratorResult<Vec<Task>>;
}

/// Updated inputs returned by conflict resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The (possibly modified) task list for the next pass.
    pub tasks: Vec<Task>,
    /// The (possibly widened) preferences for the next pass.
    pub preferences: Preferences,
}

/// Surfaces conflicts for human resolution and returns updated inputs.
#[async_trait]
pub trait ConflictResolver: Send + Sync {
    /// Presents `conflicts` and returns the inputs for the retry pass.
    async fn resolve(
        &self,
        conflicts: &[SchedulingConflict],
        tasks: &[Task],
        preferences: &Preferences,
    ) -> CollaboratorResult<Resolution>;
}

/// Writes the plan to an external calendar.
#[async_trait]
pub trait CalendarSink: Send + Sync {
    /// Persists the placed tasks; returns external event identifiers in
    /// placement order.
    async fn integrate(&self, plan: &[ScheduledTask]) -> CollaboratorResult<Vec<String>>;
}

/// Produces downstream advisory notes for a finished plan.
#[async_trait]
pub trait PlanAdvisor: Send + Sync {
    /// Returns free-text advisories (e.g. a meal suggestion).
    async fn advise(&self, result: &SchedulingResult) -> CollaboratorResult<Vec<String>>;
}
