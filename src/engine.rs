//! Priority-driven greedy placement engine.
//!
//! # Algorithm
//!
//! 1. Validate the task list (reject structurally invalid input whole).
//! 2. Stable-sort task indices by (priority ascending, deadline ascending
//!    with "no deadline" last, original input order).
//! 3. For each task: enumerate candidate windows, ask the selection
//!    strategy, and either place the task (consuming the window's slots)
//!    or record a conflict and move on.
//!
//! Placement mutates the shared grid sequentially, so every later task
//! sees the reduced availability. A pass never throws for non-placement;
//! the caller always receives a complete [`SchedulingResult`].

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::ScheduleError;
use crate::grid::{find_candidates, AvailabilityGrid};
use crate::models::{
    Preferences, ScheduledTask, SchedulingConflict, SchedulingResult, Task,
};
use crate::selection::{EarliestFit, SelectionContext, SlotSelector};
use crate::validation::validate_tasks;

/// The scheduling engine for one invocation.
///
/// Holds the pluggable slot-selection strategy; everything else (tasks,
/// grid, preferences) is passed per call so invocations share no state.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timeblock::engine::SchedulingEngine;
/// use timeblock::grid::GridBuilder;
/// use timeblock::models::{Preferences, Task};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let mut grid = GridBuilder::new(day).build();
/// let tasks = vec![Task::new("t1", "Draft report", 90).with_priority(1)];
///
/// let engine = SchedulingEngine::new();
/// let result = engine
///     .schedule(&tasks, &mut grid, &Preferences::default())
///     .await
///     .unwrap();
/// assert_eq!(result.placed_count(), 1);
/// # }
/// ```
pub struct SchedulingEngine {
    selector: Box<dyn SlotSelector>,
}

impl SchedulingEngine {
    /// Creates an engine with the deterministic earliest-fit strategy.
    pub fn new() -> Self {
        Self {
            selector: Box::new(EarliestFit::new()),
        }
    }

    /// Sets the slot-selection strategy.
    pub fn with_selector<S: SlotSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Schedules `tasks` onto `grid`.
    ///
    /// Returns an error only for structurally invalid input; unplaceable
    /// tasks become conflicts in the result.
    pub async fn schedule(
        &self,
        tasks: &[Task],
        grid: &mut AvailabilityGrid,
        preferences: &Preferences,
    ) -> Result<SchedulingResult, ScheduleError> {
        validate_tasks(tasks).map_err(ScheduleError::InvalidInput)?;

        let horizon_start = grid
            .slots()
            .first()
            .map(|s| s.start.date())
            .unwrap_or_default();

        let mut result = SchedulingResult::new();

        for &index in &order_tasks(tasks) {
            let task = &tasks[index];
            let candidates = find_candidates(task.duration_minutes, grid);

            if candidates.is_empty() {
                debug!(task = %task.id, duration = task.duration_minutes, "no fitting window");
                result.add_conflict(SchedulingConflict::no_fitting_window(
                    &task.id,
                    &task.description,
                    task.duration_minutes,
                ));
                continue;
            }

            let selection = {
                let context = SelectionContext {
                    preferences,
                    already_scheduled: &result.plan,
                    horizon_start,
                };
                self.selector.select(task, &candidates, &context).await
            };

            match selection {
                Some(chosen_index) => {
                    let chosen = candidates[chosen_index];
                    grid.occupy(chosen.offset, chosen.len);
                    debug!(
                        task = %task.id,
                        start = %chosen.start,
                        end = %chosen.end,
                        strategy = self.selector.name(),
                        "task placed"
                    );
                    result.add_placement(ScheduledTask {
                        task_id: task.id.clone(),
                        description: task.description.clone(),
                        category: task.category.clone(),
                        location: task.location.clone(),
                        date: chosen.start.date(),
                        start: chosen.start,
                        end: chosen.end,
                        duration_minutes: task.duration_minutes,
                    });
                }
                None => {
                    debug!(task = %task.id, "no candidate satisfies constraints");
                    result.add_conflict(SchedulingConflict::constraints_unsatisfied(
                        &task.id,
                        &task.description,
                    ));
                }
            }
        }

        Ok(result)
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns task indices in placement order.
///
/// Stable sort: priority ascending, then deadline ascending with missing
/// deadlines last, then original input order.
fn order_tasks(tasks: &[Task]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..tasks.len()).collect();
    indices.sort_by_key(|&i| {
        (
            tasks[i].priority,
            tasks[i].deadline.unwrap_or(NaiveDateTime::MAX),
        )
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::models::{CalendarEvent, ConflictReason, TimeWindow};
    use chrono::{Duration, NaiveDate};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn dentist() -> CalendarEvent {
        CalendarEvent::new(
            "Dentist Appointment",
            day().and_hms_opt(10, 0, 0).unwrap(),
            day().and_hms_opt(10, 45, 0).unwrap(),
        )
    }

    async fn run(
        tasks: Vec<Task>,
        events: Vec<CalendarEvent>,
    ) -> (SchedulingResult, AvailabilityGrid) {
        let mut grid = GridBuilder::new(day()).with_events(events).build();
        let result = SchedulingEngine::new()
            .schedule(&tasks, &mut grid, &Preferences::default())
            .await
            .unwrap();
        (result, grid)
    }

    #[tokio::test]
    async fn test_single_task_earliest_placement() {
        let tasks = vec![Task::new("t1", "report", 60).with_priority(1)];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.plan[0].start, day().and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(result.plan[0].end, day().and_hms_opt(10, 0, 0).unwrap());
        assert!(!result.needs_follow_up);
    }

    #[tokio::test]
    async fn test_worked_example_day() {
        // One day, default hours, lunch 13:00-14:00, dentist 10:00-10:45.
        // T1 (90 min) skips the short 09:00-10:00 run and lands at 10:45;
        // T2 (300 min) fits no single free run and conflicts.
        let tasks = vec![
            Task::new("t1", "Draft Q4 report", 90).with_priority(1),
            Task::new("t2", "Plan 2025 strategy", 300).with_priority(1),
        ];
        let (result, _) = run(tasks, vec![dentist()]).await;

        assert_eq!(result.placed_count(), 1);
        let placed = &result.plan[0];
        assert_eq!(placed.task_id, "t1");
        assert_eq!(placed.start, day().and_hms_opt(10, 45, 0).unwrap());
        assert_eq!(placed.end, day().and_hms_opt(12, 15, 0).unwrap());

        assert_eq!(result.conflicts.len(), 1);
        let conflict = &result.conflicts[0];
        assert_eq!(conflict.task_id, "t2");
        assert_eq!(conflict.reason, ConflictReason::NoFittingWindow);
        assert!(conflict.detail.contains("300 minutes"));
        assert!(result.needs_follow_up);
    }

    #[tokio::test]
    async fn test_placement_consumes_availability() {
        let tasks = vec![
            Task::new("t1", "first", 60).with_priority(1),
            Task::new("t2", "second", 60).with_priority(2),
        ];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.plan[0].start, day().and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(result.plan[1].start, day().and_hms_opt(10, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_no_double_booking() {
        let tasks = vec![
            Task::new("t1", "a", 90).with_priority(1),
            Task::new("t2", "b", 120).with_priority(2),
            Task::new("t3", "c", 45).with_priority(3),
            Task::new("t4", "d", 60).with_priority(3),
        ];
        let busy = dentist();
        let (result, _) = run(tasks, vec![busy.clone()]).await;

        let mut intervals: Vec<TimeWindow> =
            result.plan.iter().map(|p| TimeWindow::new(p.start, p.end)).collect();
        intervals.push(busy.window());

        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[tokio::test]
    async fn test_priority_wins_scarce_window() {
        // Only free time: 09:00-10:00. Low-priority first in input order,
        // high-priority must still win the slot.
        let wall = CalendarEvent::new(
            "All-day workshop",
            day().and_hms_opt(10, 0, 0).unwrap(),
            day().and_hms_opt(17, 0, 0).unwrap(),
        );
        let tasks = vec![
            Task::new("low", "filing", 60).with_priority(3),
            Task::new("high", "board prep", 60).with_priority(1),
        ];
        let (result, _) = run(tasks, vec![wall]).await;

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.plan[0].task_id, "high");
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].task_id, "low");
    }

    #[tokio::test]
    async fn test_deadline_orders_within_priority() {
        let tasks = vec![
            Task::new("none", "no deadline", 60).with_priority(2),
            Task::new("late", "due friday", 60)
                .with_priority(2)
                .with_deadline((day() + Duration::days(4)).and_hms_opt(17, 0, 0).unwrap()),
            Task::new("soon", "due today", 60)
                .with_priority(2)
                .with_deadline(day().and_hms_opt(17, 0, 0).unwrap()),
        ];
        let (result, _) = run(tasks, Vec::new()).await;

        let order: Vec<&str> = result.plan.iter().map(|p| p.task_id.as_str()).collect();
        assert_eq!(order, vec!["soon", "late", "none"]);
        assert_eq!(result.plan[0].start, day().and_hms_opt(9, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_full_tie_keeps_input_order() {
        let tasks = vec![
            Task::new("first", "a", 30).with_priority(2),
            Task::new("second", "b", 30).with_priority(2),
        ];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.plan[0].task_id, "first");
        assert_eq!(result.plan[1].task_id, "second");
    }

    #[tokio::test]
    async fn test_constraint_conflict() {
        // Work ends at 17:00; nothing can start after 18:00
        let tasks = vec![Task::new("gym", "evening run", 60)
            .with_priority(3)
            .with_constraint("after 18:00")];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(
            result.conflicts[0].reason,
            ConflictReason::ConstraintsUnsatisfied
        );
    }

    #[tokio::test]
    async fn test_constraint_shifts_placement() {
        let tasks = vec![Task::new("call", "call overseas office", 30)
            .with_priority(1)
            .with_constraint("after 15:00")];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.plan[0].start, day().and_hms_opt(15, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_empty_task_list_rejected() {
        let mut grid = GridBuilder::new(day()).build();
        let error = SchedulingEngine::new()
            .schedule(&[], &mut grid, &Preferences::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ScheduleError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_non_positive_duration_rejected() {
        let mut grid = GridBuilder::new(day()).build();
        let tasks = vec![Task::new("bad", "zero minutes", 0)];
        let error = SchedulingEngine::new()
            .schedule(&tasks, &mut grid, &Preferences::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ScheduleError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_conflicted_task_skipped_not_fatal() {
        // Oversized task conflicts; the following task still gets placed
        let tasks = vec![
            Task::new("huge", "impossible", 600).with_priority(1),
            Task::new("small", "possible", 30).with_priority(2),
        ];
        let (result, _) = run(tasks, Vec::new()).await;
        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.plan[0].task_id, "small");
        assert_eq!(result.conflicts[0].task_id, "huge");
    }

    #[tokio::test]
    async fn test_custom_selector_choice_is_honored() {
        use crate::selection::SelectionContext;
        use async_trait::async_trait;

        // Always takes the latest candidate instead of the earliest
        struct LatestFit;

        #[async_trait]
        impl SlotSelector for LatestFit {
            fn name(&self) -> &'static str {
                "latest-fit"
            }

            async fn select(
                &self,
                _task: &Task,
                candidates: &[crate::grid::CandidateWindow],
                _context: &SelectionContext<'_>,
            ) -> Option<usize> {
                Some(candidates.len() - 1)
            }
        }

        let tasks = vec![Task::new("t1", "report", 60).with_priority(1)];
        let mut grid = GridBuilder::new(day()).build();
        let result = SchedulingEngine::new()
            .with_selector(LatestFit)
            .schedule(&tasks, &mut grid, &Preferences::default())
            .await
            .unwrap();

        // Latest 60-minute window in a 09:00-17:00 day ends at 17:00
        assert_eq!(result.plan[0].start, day().and_hms_opt(16, 0, 0).unwrap());
        assert_eq!(result.plan[0].end, day().and_hms_opt(17, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_multi_day_spillover() {
        // Day one has 7h of work time minus lunch; the third 180-min task
        // no longer fits and lands on day two.
        let tasks = vec![
            Task::new("a", "block a", 180).with_priority(1),
            Task::new("b", "block b", 180).with_priority(2),
            Task::new("c", "block c", 180).with_priority(3),
        ];
        let mut grid = GridBuilder::new(day()).with_horizon_days(2).build();
        let result = SchedulingEngine::new()
            .schedule(&tasks, &mut grid, &Preferences::default())
            .await
            .unwrap();

        assert_eq!(result.placed_count(), 3);
        assert_eq!(result.plan[2].date, day() + Duration::days(1));
        assert!(!result.needs_follow_up);
    }
}
