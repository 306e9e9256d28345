//! The bounded-retry scheduling workflow.
//!
//! A finite-state machine over
//! `Decompose → Schedule → {AskUser → Schedule | Integrate → Advise → Done}`.
//! The retry counter carried in the run state is the termination contract:
//! once it reaches `max_retries`, the follow-up flag is forced off and the
//! workflow proceeds with whatever was placed, conflicts still listed for
//! visibility. The controller never re-enters Decompose.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engine::SchedulingEngine;
use crate::error::ScheduleError;
use crate::grid::{GridBuilder, DEFAULT_GRANULARITY_MINUTES};
use crate::models::{CalendarEvent, Preferences, SchedulingResult, Task};

use super::collaborators::{
    CalendarSink, ConflictResolver, PlanAdvisor, TaskSource,
};

/// Default bound on conflict-resolution retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default scheduling horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Obtain the task list from the task source.
    Decompose,
    /// Run a scheduling pass over the current inputs.
    Schedule,
    /// Surface conflicts for external resolution, then retry.
    AskUser,
    /// Write the plan to the external calendar.
    Integrate,
    /// Collect downstream advisories.
    Advise,
    /// Terminal state.
    Done,
}

/// Fatal workflow errors.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The task source failed; there is nothing to schedule.
    #[error("task decomposition failed: {0}")]
    Decomposition(String),
    /// The scheduling engine rejected the input.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// One scheduling request: horizon and external inputs.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// First day of the horizon.
    pub start_day: NaiveDate,
    /// Number of consecutive days to plan over.
    pub horizon_days: u32,
    /// Grid slot granularity in minutes.
    pub granularity_minutes: i64,
    /// User time preferences.
    pub preferences: Preferences,
    /// Busy blocks from the external calendar.
    pub events: Vec<CalendarEvent>,
}

impl PlanRequest {
    /// Creates a request for the default seven-day horizon.
    pub fn new(start_day: NaiveDate) -> Self {
        Self {
            start_day,
            horizon_days: DEFAULT_HORIZON_DAYS,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            preferences: Preferences::default(),
            events: Vec::new(),
        }
    }

    /// Sets the horizon length.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days.max(1);
        self
    }

    /// Sets the slot granularity.
    pub fn with_granularity(mut self, minutes: i64) -> Self {
        self.granularity_minutes = minutes.max(1);
        self
    }

    /// Sets the preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Adds busy calendar events.
    pub fn with_events(mut self, events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        self.events.extend(events);
        self
    }
}

/// State carried through one workflow run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Current task list (may be updated by conflict resolution).
    pub tasks: Vec<Task>,
    /// Current preferences (may be widened by conflict resolution).
    pub preferences: Preferences,
    /// Busy blocks applied on every pass.
    pub events: Vec<CalendarEvent>,
    /// Result of the most recent scheduling pass.
    pub result: SchedulingResult,
    /// Conflict-resolution retries consumed so far.
    pub retry_count: u32,
    /// Scheduling passes executed.
    pub schedule_passes: u32,
    /// External event ids from calendar integration.
    pub integrated_event_ids: Vec<String>,
    /// Downstream advisory notes.
    pub advisories: Vec<String>,
    /// Non-fatal collaborator failures, for visibility.
    pub errors: Vec<String>,
}

/// Drives the workflow over pluggable collaborators.
///
/// Only the task source is mandatory. Without a conflict resolver the
/// AskUser state retries with unchanged inputs until the bound is hit;
/// without a sink or advisor those states are no-ops.
pub struct Orchestrator {
    engine: SchedulingEngine,
    max_retries: u32,
    source: Box<dyn TaskSource>,
    resolver: Option<Box<dyn ConflictResolver>>,
    sink: Option<Box<dyn CalendarSink>>,
    advisor: Option<Box<dyn PlanAdvisor>>,
}

impl Orchestrator {
    /// Creates an orchestrator around a task source.
    pub fn new<S: TaskSource + 'static>(source: S) -> Self {
        Self {
            engine: SchedulingEngine::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            source: Box::new(source),
            resolver: None,
            sink: None,
            advisor: None,
        }
    }

    /// Sets the scheduling engine (e.g. with an advisory selector).
    pub fn with_engine(mut self, engine: SchedulingEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the retry bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the conflict resolver.
    pub fn with_resolver<R: ConflictResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Sets the calendar sink.
    pub fn with_sink<K: CalendarSink + 'static>(mut self, sink: K) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets the plan advisor.
    pub fn with_plan_advisor<P: PlanAdvisor + 'static>(mut self, advisor: P) -> Self {
        self.advisor = Some(Box::new(advisor));
        self
    }

    /// Runs the workflow to completion.
    ///
    /// Terminates within `max_retries + 1` scheduling passes regardless of
    /// how conflicts evolve.
    pub async fn run(&self, request: PlanRequest) -> Result<WorkflowRun, WorkflowError> {
        let mut run = WorkflowRun {
            preferences: request.preferences.clone(),
            events: request.events.clone(),
            ..WorkflowRun::default()
        };
        let mut state = WorkflowState::Decompose;

        loop {
            debug!(?state, retries = run.retry_count, "workflow state");
            state = match state {
                WorkflowState::Decompose => {
                    run.tasks = self
                        .source
                        .decompose()
                        .await
                        .map_err(|e| WorkflowError::Decomposition(e.to_string()))?;
                    info!(tasks = run.tasks.len(), "decomposition complete");
                    WorkflowState::Schedule
                }

                WorkflowState::Schedule => {
                    let mut grid = GridBuilder::new(request.start_day)
                        .with_horizon_days(request.horizon_days)
                        .with_granularity(request.granularity_minutes)
                        .with_preferences(run.preferences.clone())
                        .with_events(run.events.iter().cloned())
                        .build();
                    run.result = self
                        .engine
                        .schedule(&run.tasks, &mut grid, &run.preferences)
                        .await?;
                    run.schedule_passes += 1;
                    info!(
                        pass = run.schedule_passes,
                        placed = run.result.placed_count(),
                        conflicts = run.result.conflicts.len(),
                        "scheduling pass complete"
                    );

                    if run.retry_count >= self.max_retries {
                        if run.result.needs_follow_up {
                            info!(
                                max_retries = self.max_retries,
                                "retry bound reached, proceeding with partial plan"
                            );
                            run.result.needs_follow_up = false;
                        }
                        WorkflowState::Integrate
                    } else if run.result.needs_follow_up {
                        run.retry_count += 1;
                        WorkflowState::AskUser
                    } else {
                        WorkflowState::Integrate
                    }
                }

                WorkflowState::AskUser => {
                    match &self.resolver {
                        Some(resolver) => {
                            match resolver
                                .resolve(&run.result.conflicts, &run.tasks, &run.preferences)
                                .await
                            {
                                Ok(resolution) => {
                                    run.tasks = resolution.tasks;
                                    run.preferences = resolution.preferences;
                                }
                                Err(error) => {
                                    warn!(%error, "conflict resolution failed, retrying unchanged");
                                    run.errors
                                        .push(format!("conflict resolution failed: {error}"));
                                }
                            }
                        }
                        None => {
                            debug!("no conflict resolver configured, retrying unchanged");
                        }
                    }
                    WorkflowState::Schedule
                }

                WorkflowState::Integrate => {
                    if let Some(sink) = &self.sink {
                        match sink.integrate(&run.result.plan).await {
                            Ok(ids) => {
                                info!(events = ids.len(), "calendar integration complete");
                                run.integrated_event_ids = ids;
                            }
                            Err(error) => {
                                warn!(%error, "calendar integration failed");
                                run.errors
                                    .push(format!("calendar integration failed: {error}"));
                            }
                        }
                    }
                    WorkflowState::Advise
                }

                WorkflowState::Advise => {
                    if let Some(advisor) = &self.advisor {
                        match advisor.advise(&run.result).await {
                            Ok(notes) => run.advisories = notes,
                            Err(error) => {
                                warn!(%error, "plan advisory failed");
                                run.errors.push(format!("plan advisory failed: {error}"));
                            }
                        }
                    }
                    WorkflowState::Done
                }

                WorkflowState::Done => break,
            };
        }

        Ok(run)
    }
}
