//! Availability grid and its slots.
//!
//! The grid is an ordered sequence of fixed-granularity slots spanning one
//! or more whole calendar days. Slots are contiguous, non-overlapping, and
//! strictly increasing in start time. One grid is owned by exactly one
//! scheduling invocation; all mutation is sequential.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

/// Atomic unit of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (inclusive).
    pub start: NaiveDateTime,
    /// Slot end (exclusive); always `start + granularity`.
    pub end: NaiveDateTime,
    /// Whether the slot is still free.
    pub available: bool,
}

impl TimeSlot {
    /// Creates an available slot.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            available: true,
        }
    }

    /// The slot's interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// A multi-day sequence of time slots at a fixed granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    slots: Vec<TimeSlot>,
    granularity_minutes: i64,
}

impl AvailabilityGrid {
    /// Creates a grid from prepared slots.
    ///
    /// Callers (the builder) guarantee the ordering invariant.
    pub(crate) fn from_slots(slots: Vec<TimeSlot>, granularity_minutes: i64) -> Self {
        debug_assert!(slots.windows(2).all(|pair| pair[0].start < pair[1].start));
        Self {
            slots,
            granularity_minutes,
        }
    }

    /// Slot granularity in minutes.
    #[inline]
    pub fn granularity_minutes(&self) -> i64 {
        self.granularity_minutes
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots, in chronological order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// A single slot by index.
    pub fn slot(&self, index: usize) -> Option<&TimeSlot> {
        self.slots.get(index)
    }

    /// Number of slots still available.
    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.available).count()
    }

    /// Marks every slot overlapping `window` as unavailable.
    pub fn block(&mut self, window: &TimeWindow) {
        for slot in &mut self.slots {
            if slot.window().overlaps(window) {
                slot.available = false;
            }
        }
    }

    /// Marks a contiguous span of slots unavailable.
    ///
    /// Used by placement: the chosen candidate window's slots are consumed
    /// so subsequent tasks see reduced availability.
    pub fn occupy(&mut self, offset: usize, len: usize) {
        let end = (offset + len).min(self.slots.len());
        for slot in &mut self.slots[offset..end] {
            slot.available = false;
        }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [TimeSlot] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn make_grid(slot_count: usize) -> AvailabilityGrid {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let mut slots = Vec::new();
        let mut current = day.and_hms_opt(9, 0, 0).unwrap();
        for _ in 0..slot_count {
            let end = current + Duration::minutes(15);
            slots.push(TimeSlot::new(current, end));
            current = end;
        }
        AvailabilityGrid::from_slots(slots, 15)
    }

    #[test]
    fn test_grid_invariant() {
        let grid = make_grid(8);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.available_count(), 8);
        for pair in grid.slots().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_block_overlapping() {
        let mut grid = make_grid(8);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        // 9:20-9:40 touches the 9:15 and 9:30 slots
        grid.block(&TimeWindow::new(
            day.and_hms_opt(9, 20, 0).unwrap(),
            day.and_hms_opt(9, 40, 0).unwrap(),
        ));
        let availability: Vec<bool> = grid.slots().iter().map(|s| s.available).collect();
        assert_eq!(
            availability,
            vec![true, false, false, true, true, true, true, true]
        );
    }

    #[test]
    fn test_block_touching_endpoint_does_not_mark() {
        let mut grid = make_grid(4);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        // Ends exactly where the 9:15 slot starts; half-open, so it stays free
        grid.block(&TimeWindow::new(
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(9, 15, 0).unwrap(),
        ));
        assert!(!grid.slot(0).unwrap().available);
        assert!(grid.slot(1).unwrap().available);
    }

    #[test]
    fn test_occupy_span() {
        let mut grid = make_grid(6);
        grid.occupy(2, 3);
        let availability: Vec<bool> = grid.slots().iter().map(|s| s.available).collect();
        assert_eq!(availability, vec![true, true, false, false, false, true]);
    }

    #[test]
    fn test_occupy_clamps_to_grid_end() {
        let mut grid = make_grid(4);
        grid.occupy(3, 10);
        assert_eq!(grid.available_count(), 3);
    }
}
