//! Scheduling output model.
//!
//! One scheduling pass produces a plan (placed tasks with resolved times),
//! a conflict list (tasks that could not be placed, with machine-readable
//! reasons and human-readable suggestions), and a follow-up flag.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A successfully placed task.
///
/// Times are resolved from the chosen candidate window: `start` is the
/// window's first slot start, `end` the window's last slot end. The window
/// may be slightly longer than `duration_minutes` when the duration is not
/// a multiple of the grid granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// ID of the placed task.
    pub task_id: String,
    /// Task description (denormalized for integration convenience).
    pub description: String,
    /// Task category, if any.
    pub category: Option<String>,
    /// Task location, if any.
    pub location: Option<String>,
    /// Calendar day of placement.
    pub date: NaiveDate,
    /// Resolved start.
    pub start: NaiveDateTime,
    /// Resolved end (exclusive).
    pub end: NaiveDateTime,
    /// The task's requested duration in minutes.
    pub duration_minutes: i64,
}

/// Why a task could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictReason {
    /// No contiguous run of free slots was long enough for the task.
    NoFittingWindow,
    /// Free runs existed, but none satisfied the task's explicit constraints.
    ConstraintsUnsatisfied,
}

/// A task that could not be placed in the current pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConflict {
    /// ID of the conflicted task.
    pub task_id: String,
    /// Task description.
    pub description: String,
    /// Machine-readable reason code.
    pub reason: ConflictReason,
    /// Human-readable explanation.
    pub detail: String,
    /// Human-readable resolution suggestion.
    pub suggestion: String,
}

impl SchedulingConflict {
    /// Conflict for a task with no fitting free run anywhere on the grid.
    pub fn no_fitting_window(
        task_id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            description: description.into(),
            reason: ConflictReason::NoFittingWindow,
            detail: format!(
                "No available time slots found for the required duration of {duration_minutes} minutes."
            ),
            suggestion:
                "Consider shortening the task, moving other events, or scheduling on another day."
                    .to_string(),
        }
    }

    /// Conflict for a task whose constraints ruled out every candidate.
    pub fn constraints_unsatisfied(
        task_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            description: description.into(),
            reason: ConflictReason::ConstraintsUnsatisfied,
            detail: "No candidate window satisfies the task's time constraints.".to_string(),
            suggestion: "Relax the task's time constraints or schedule on another day."
                .to_string(),
        }
    }
}

/// The output of one scheduling pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulingResult {
    /// Placed tasks, in placement order.
    pub plan: Vec<ScheduledTask>,
    /// Tasks that could not be placed.
    pub conflicts: Vec<SchedulingConflict>,
    /// Whether conflicts require human resolution.
    ///
    /// True iff `conflicts` is non-empty, except after retry exhaustion in
    /// the workflow, which forces it false so the run can terminate.
    pub needs_follow_up: bool,
}

impl SchedulingResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement.
    pub fn add_placement(&mut self, scheduled: ScheduledTask) {
        self.plan.push(scheduled);
    }

    /// Records a conflict and raises the follow-up flag.
    pub fn add_conflict(&mut self, conflict: SchedulingConflict) {
        self.conflicts.push(conflict);
        self.needs_follow_up = true;
    }

    /// Whether every task was placed.
    pub fn is_fully_placed(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of placed tasks.
    pub fn placed_count(&self) -> usize {
        self.plan.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_placement() -> ScheduledTask {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        ScheduledTask {
            task_id: "t1".into(),
            description: "Draft Q4 report".into(),
            category: Some("work".into()),
            location: None,
            date: day,
            start: day.and_hms_opt(10, 45, 0).unwrap(),
            end: day.and_hms_opt(12, 15, 0).unwrap(),
            duration_minutes: 90,
        }
    }

    #[test]
    fn test_result_accumulation() {
        let mut result = SchedulingResult::new();
        assert!(result.is_fully_placed());
        assert!(!result.needs_follow_up);

        result.add_placement(sample_placement());
        assert_eq!(result.placed_count(), 1);
        assert!(!result.needs_follow_up);

        result.add_conflict(SchedulingConflict::no_fitting_window(
            "t2",
            "Plan company strategy",
            300,
        ));
        assert!(!result.is_fully_placed());
        assert!(result.needs_follow_up);
    }

    #[test]
    fn test_conflict_factories() {
        let c = SchedulingConflict::no_fitting_window("t2", "strategy", 300);
        assert_eq!(c.reason, ConflictReason::NoFittingWindow);
        assert!(c.detail.contains("300 minutes"));
        assert!(c.suggestion.contains("another day"));

        let c2 = SchedulingConflict::constraints_unsatisfied("t3", "run");
        assert_eq!(c2.reason, ConflictReason::ConstraintsUnsatisfied);
    }
}
