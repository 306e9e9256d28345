//! Slot-selection strategies.
//!
//! The engine delegates "which candidate window should this task take" to a
//! pluggable [`SlotSelector`]. Two implementations are provided:
//!
//! - [`EarliestFit`]: deterministic fallback, earliest constraint-satisfying
//!   window.
//! - [`AdvisorySelector`]: delegates to a possibly-external, possibly
//!   non-deterministic [`Advisor`] under a timeout, and re-validates its
//!   answer against the task's hard constraints before accepting it. Any
//!   advisory failure falls back to the deterministic choice.
//!
//! A selector returns `None` only when no candidate satisfies the task's
//! explicit constraints; that is a conflict trigger distinct from "no
//! candidates at all".

mod advisory;
mod constraints;
mod earliest;
mod http;

pub use advisory::{
    window_id, Advisor, AdvisoryRequest, AdvisoryResponse, AdvisorySelector, CandidateSummary,
    DEFAULT_ADVISORY_TIMEOUT,
};
pub use constraints::{parse_constraint, ConstraintSet, TimeConstraint};
pub use earliest::EarliestFit;
pub use http::HttpAdvisor;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::grid::CandidateWindow;
use crate::models::{Preferences, ScheduledTask, Task};

/// Context shared with a selector for one placement decision.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// The user's time preferences.
    pub preferences: &'a Preferences,
    /// Tasks already placed earlier in this pass, informational.
    pub already_scheduled: &'a [ScheduledTask],
    /// First day of the scheduling horizon (anchors end-of-day constraints).
    pub horizon_start: NaiveDate,
}

/// A slot-selection strategy.
///
/// `select` receives the non-empty candidate list for one task and returns
/// the index of the chosen window, or `None` when no candidate satisfies
/// the task's explicit constraints.
#[async_trait]
pub trait SlotSelector: Send + Sync {
    /// Strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Chooses a candidate window for `task`.
    async fn select(
        &self,
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Option<usize>;
}
