//! Time window (interval) primitives.
//!
//! Half-open intervals over naive local datetimes. These underlie both
//! blackout application in the grid builder and busy-time statistics.
//!
//! # Time Model
//! All instants are timezone-naive (`chrono::NaiveDateTime`); the consumer
//! guarantees a single consistent timezone across one scheduling request.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open: includes start, excludes end. Touching endpoints do not overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Duration of this window in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Merges windows into the minimal disjoint cover.
    ///
    /// Sorts by start and folds adjacent or overlapping windows together.
    /// Zero-length and inverted windows are dropped.
    pub fn merge(mut windows: Vec<TimeWindow>) -> Vec<TimeWindow> {
        windows.retain(|w| w.end > w.start);
        if windows.is_empty() {
            return windows;
        }
        windows.sort_by_key(|w| w.start);

        let mut merged: Vec<TimeWindow> = Vec::with_capacity(windows.len());
        for window in windows {
            match merged.last_mut() {
                Some(last) if window.start <= last.end => {
                    last.end = last.end.max(window.end);
                }
                _ => merged.push(window),
            }
        }
        merged
    }
}
