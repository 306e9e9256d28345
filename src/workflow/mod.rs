//! Bounded-retry scheduling workflow.
//!
//! Sequences decomposition, scheduling, conflict-resolution retries, and
//! downstream integration as an explicit finite-state machine. The retry
//! counter in the carried state guarantees termination; there is no
//! unbounded recursion anywhere in the loop.
//!
//! External effects live behind the collaborator traits; the controller
//! only sequences them and merges their side-channel outputs into the run.

mod collaborators;
mod controller;

pub use collaborators::{
    CalendarSink, CollaboratorError, CollaboratorResult, ConflictResolver, PlanAdvisor,
    Resolution, TaskSource,
};
pub use controller::{
    Orchestrator, PlanRequest, WorkflowError, WorkflowRun, WorkflowState,
    DEFAULT_HORIZON_DAYS, DEFAULT_MAX_RETRIES,
};
