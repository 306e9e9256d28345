//! Advisory slot selection.
//!
//! Delegates the choice among candidate windows to an [`Advisor`] — in
//! production an out-of-process service that weighs soft context (category
//! grouping, energy, preferences) the deterministic selector ignores. The
//! advisor is never trusted: its answer is re-validated against the grid
//! candidates and the task's hard constraints, and every failure mode
//! (timeout, transport error, malformed or out-of-range id) falls back to
//! [`EarliestFit`]. The advisor is asked exactly once per placement.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AdvisorError;
use crate::grid::CandidateWindow;
use crate::models::{Preferences, ScheduledTask, Task};

use super::constraints::ConstraintSet;
use super::earliest::EarliestFit;
use super::{SelectionContext, SlotSelector};

/// Default deadline for one advisory call.
pub const DEFAULT_ADVISORY_TIMEOUT: Duration = Duration::from_secs(10);

/// A candidate window as serialized for the advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// Wire id, `slot_<index>`.
    pub id: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
}

/// One advisory request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    /// The task being placed.
    pub task: Task,
    /// All candidate windows, in chronological order.
    pub candidates: Vec<CandidateSummary>,
    /// The user's preferences.
    pub preferences: Preferences,
    /// What has already been placed in this pass.
    pub already_scheduled: Vec<ScheduledTask>,
}

impl AdvisoryRequest {
    /// Builds a request from the engine's working state.
    pub fn new(
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Self {
        Self {
            task: task.clone(),
            candidates: candidates
                .iter()
                .enumerate()
                .map(|(index, c)| CandidateSummary {
                    id: window_id(index),
                    start: c.start,
                    end: c.end,
                })
                .collect(),
            preferences: context.preferences.clone(),
            already_scheduled: context.already_scheduled.to_vec(),
        }
    }
}

/// One advisory response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    /// The chosen window's wire id, or `None` for "no feasible slot".
    #[serde(default)]
    pub chosen_window_id: Option<String>,
    /// The advisor's explanation, logged for visibility.
    #[serde(default)]
    pub reasoning: String,
}

/// Wire id for the candidate at `index`.
pub fn window_id(index: usize) -> String {
    format!("slot_{index}")
}

fn parse_window_id(id: &str) -> Option<usize> {
    id.trim().strip_prefix("slot_")?.parse().ok()
}

/// A slot-choice advisor, typically out-of-process.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Advisor name, for logging.
    fn name(&self) -> &'static str;

    /// Recommends one of the request's candidate windows.
    async fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse, AdvisorError>;
}

/// Selector that consults an advisor and validates its answer.
pub struct AdvisorySelector<A> {
    advisor: A,
    timeout: Duration,
    fallback: EarliestFit,
}

impl<A: Advisor> AdvisorySelector<A> {
    /// Creates a selector with the default timeout.
    pub fn new(advisor: A) -> Self {
        Self {
            advisor,
            timeout: DEFAULT_ADVISORY_TIMEOUT,
            fallback: EarliestFit::new(),
        }
    }

    /// Sets the advisory deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates an advisory answer against range and hard constraints.
    fn validate_choice(
        &self,
        response: &AdvisoryResponse,
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        let id = response.chosen_window_id.as_deref()?;
        let index = parse_window_id(id)?;
        if index >= candidates.len() {
            return None;
        }
        let constraints = ConstraintSet::parse(&task.constraints);
        constraints
            .allows(&candidates[index].window(), context.horizon_start)
            .then_some(index)
    }
}

#[async_trait]
impl<A: Advisor> SlotSelector for AdvisorySelector<A> {
    fn name(&self) -> &'static str {
        "advisory"
    }

    async fn select(
        &self,
        task: &Task,
        candidates: &[CandidateWindow],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        // Hard constraints first: if nothing qualifies there is no point
        // consulting the advisor, and the conflict is ours to report.
        EarliestFit::pick(task, candidates, context)?;

        let request = AdvisoryRequest::new(task, candidates, context);
        let outcome = tokio::time::timeout(self.timeout, self.advisor.advise(&request)).await;

        match outcome {
            Ok(Ok(response)) => {
                if let Some(index) = self.validate_choice(&response, task, candidates, context) {
                    debug!(
                        task = %task.id,
                        advisor = self.advisor.name(),
                        chosen = index,
                        reasoning = %response.reasoning,
                        "advisory choice accepted"
                    );
                    return Some(index);
                }
                warn!(
                    task = %task.id,
                    advisor = self.advisor.name(),
                    chosen = ?response.chosen_window_id,
                    "advisory choice rejected, using earliest fit"
                );
            }
            Ok(Err(error)) => {
                warn!(
                    task = %task.id,
                    advisor = self.advisor.name(),
                    %error,
                    "advisory call failed, using earliest fit"
                );
            }
            Err(_) => {
                warn!(
                    task = %task.id,
                    advisor = self.advisor.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "advisory call timed out, using earliest fit"
                );
            }
        }

        self.fallback.select(task, candidates, context).await
    }
}
