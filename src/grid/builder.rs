//! Availability grid construction.
//!
//! Builds the slotted horizon for one scheduling pass: every slot of every
//! day starts available, then preference blackouts (outside work hours,
//! lunch) and busy calendar blocks are applied. Building is pure with
//! respect to its inputs; the returned grid is the caller's to mutate.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::models::{CalendarEvent, Preferences, TimeWindow};

use super::slot::{AvailabilityGrid, TimeSlot};

/// Default slot granularity in minutes.
pub const DEFAULT_GRANULARITY_MINUTES: i64 = 15;

/// Builder for an [`AvailabilityGrid`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timeblock::grid::GridBuilder;
/// use timeblock::models::Preferences;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let grid = GridBuilder::new(day)
///     .with_horizon_days(7)
///     .with_preferences(Preferences::default())
///     .build();
/// assert_eq!(grid.len(), 7 * 96);
/// ```
#[derive(Debug, Clone)]
pub struct GridBuilder {
    start_day: NaiveDate,
    horizon_days: u32,
    granularity_minutes: i64,
    preferences: Preferences,
    events: Vec<CalendarEvent>,
}

impl GridBuilder {
    /// Creates a builder for a single-day grid starting at `start_day`.
    pub fn new(start_day: NaiveDate) -> Self {
        Self {
            start_day,
            horizon_days: 1,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            preferences: Preferences::default(),
            events: Vec::new(),
        }
    }

    /// Sets the number of consecutive days to cover.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days.max(1);
        self
    }

    /// Sets the slot granularity in minutes (must be positive).
    pub fn with_granularity(mut self, minutes: i64) -> Self {
        self.granularity_minutes = minutes.max(1);
        self
    }

    /// Sets the user preferences applied as blackouts.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Adds busy calendar events.
    pub fn with_events(mut self, events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Builds the grid.
    ///
    /// Day by day: initialize all slots available, black out slots outside
    /// work hours, then block the merged cover of lunch windows and busy
    /// events whose date falls on a grid day.
    pub fn build(&self) -> AvailabilityGrid {
        let mut slots = Vec::new();
        for offset in 0..self.horizon_days {
            self.push_day_slots(&mut slots, self.day_at(offset));
        }
        let mut grid = AvailabilityGrid::from_slots(slots, self.granularity_minutes);

        self.apply_work_hours(&mut grid);

        for window in self.blackout_windows() {
            grid.block(&window);
        }

        debug!(
            days = self.horizon_days,
            slots = grid.len(),
            available = grid.available_count(),
            "availability grid built"
        );
        grid
    }

    fn day_at(&self, offset: u32) -> NaiveDate {
        self.start_day + Duration::days(i64::from(offset))
    }

    /// Appends one day's slots, 00:00 up to midnight.
    ///
    /// A granularity that does not divide 24h leaves the ragged tail
    /// uncovered rather than spilling past midnight.
    fn push_day_slots(&self, slots: &mut Vec<TimeSlot>, day: NaiveDate) {
        let day_start = day.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let mut current = day_start;
        loop {
            let end = current + Duration::minutes(self.granularity_minutes);
            if end > day_end {
                break;
            }
            slots.push(TimeSlot::new(current, end));
            current = end;
        }
    }

    /// Marks every slot starting outside `[work_start, work_end)` unavailable.
    fn apply_work_hours(&self, grid: &mut AvailabilityGrid) {
        let start = self.preferences.work_start;
        let end = self.preferences.work_end;
        for slot in grid.slots_mut() {
            let time_of_day = slot.start.time();
            if !(start <= time_of_day && time_of_day < end) {
                slot.available = false;
            }
        }
    }

    /// Lunch windows for every grid day plus busy events on grid days,
    /// merged into a minimal disjoint cover.
    fn blackout_windows(&self) -> Vec<TimeWindow> {
        let mut windows = Vec::new();

        for offset in 0..self.horizon_days {
            let day = self.day_at(offset);
            let lunch_start: NaiveDateTime = day.and_time(self.preferences.lunch_start);
            let lunch_end =
                lunch_start + Duration::minutes(self.preferences.lunch_duration_minutes);
            windows.push(TimeWindow::new(lunch_start, lunch_end));

            for event in &self.events {
                if event.date() == day {
                    windows.push(event.window());
                }
            }
        }

        TimeWindow::merge(windows)
    }
}
