//! Candidate window enumeration.
//!
//! Slides a fixed-length window across the grid and returns every position
//! where all slots are free. Overlapping windows are expected; the
//! selection strategy disambiguates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

use super::slot::AvailabilityGrid;

/// A contiguous run of available slots long enough to host a task.
///
/// Ephemeral: computed fresh per task and discarded after selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateWindow {
    /// Index of the first slot in the grid.
    pub offset: usize,
    /// Number of slots covered.
    pub len: usize,
    /// Start of the first slot.
    pub start: NaiveDateTime,
    /// End of the last slot.
    pub end: NaiveDateTime,
}

impl CandidateWindow {
    /// The window's interval.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// Number of slots needed to host `duration_minutes` (ceiling division).
pub fn required_slots(duration_minutes: i64, granularity_minutes: i64) -> usize {
    if duration_minutes <= 0 || granularity_minutes <= 0 {
        return 0;
    }
    // Both operands are guaranteed positive by the guard above, so this is
    // exact ceiling division (signed `div_ceil` is not yet stable).
    ((duration_minutes + granularity_minutes - 1) / granularity_minutes) as usize
}

/// Enumerates all candidate windows for a task of `duration_minutes`.
///
/// Returns windows in grid order (chronological). An empty result is not
/// an error; it is the primary conflict trigger.
pub fn find_candidates(duration_minutes: i64, grid: &AvailabilityGrid) -> Vec<CandidateWindow> {
    let required = required_slots(duration_minutes, grid.granularity_minutes());
    if required == 0 || required > grid.len() {
        return Vec::new();
    }

    let slots = grid.slots();
    let mut candidates = Vec::new();
    for offset in 0..=(slots.len() - required) {
        let window = &slots[offset..offset + required];
        if window.iter().all(|slot| slot.available) {
            candidates.push(CandidateWindow {
                offset,
                len: required,
                start: window[0].start,
                end: window[required - 1].end,
            });
        }
    }
    candidates
}
