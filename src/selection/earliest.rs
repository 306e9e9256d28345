//! Deterministic earliest-fit selection.

use async_trait::async_trait;

use crate::grid::CandidateWindow;
use crate::models::Task;

use super::constraints::ConstraintSet;
use super::{SelectionContext, SlotSelector};

/// Earliest feasible window.
///
/// Takes the first candidate that satisfies the task's constraints.
/// Candidates arrive in chronological order, so the first allowed one is
/// the earliest. This is the fallback for every advisory failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestFit;

impl EarliestFit {
    /// Creates the selector.
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn pick(
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        let constraints = ConstraintSet::parse(&task.constraints);
        candidates
            .iter()
            .position(|c| constraints.allows(&c.window(), context.horizon_start))
    }
}

#[async_trait]
impl SlotSelector for EarliestFit {
    fn name(&self) -> &'static str {
        "earliest-fit"
    }

    async fn select(
        &self,
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        Self::pick(task, candidates, context)
    }
}
