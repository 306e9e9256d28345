//! External calendar event model.
//!
//! Busy blocks supplied by the calendar provider. Read-only input to grid
//! construction; the engine treats every existing event as an immovable
//! blocker regardless of the `movable` flag.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// An existing calendar event (busy block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title.
    pub summary: String,
    /// Event start.
    pub start: NaiveDateTime,
    /// Event end (exclusive).
    pub end: NaiveDateTime,
    /// Whether the owner marked the event as movable. Informational only.
    pub movable: bool,
    /// Whether the event came from an external calendar.
    pub external: bool,
}

impl CalendarEvent {
    /// Creates a new immovable external event.
    pub fn new(summary: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
            movable: false,
            external: true,
        }
    }

    /// Marks the event as movable.
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Marks the event as internal (created by this system).
    pub fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// The calendar day the event starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// The event's busy interval.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_event_defaults() {
        let event = CalendarEvent::new("Dentist Appointment", at(10, 0), at(10, 45));
        assert!(!event.movable);
        assert!(event.external);
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(event.window().duration_minutes(), 45);
    }

    #[test]
    fn test_event_flags() {
        let event = CalendarEvent::new("Focus Work", at(11, 30), at(13, 0))
            .with_movable(true)
            .with_external(false);
        assert!(event.movable);
        assert!(!event.external);
    }
}
