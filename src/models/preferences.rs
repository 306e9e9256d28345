//! User scheduling preferences.
//!
//! Work hours and lunch define the preference-derived blackout windows the
//! grid builder applies before busy blocks. Providers supply times as
//! `"HH:MM"` strings; missing fields fall back to the defaults below.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Default work-hours start when the provider omits it.
pub const DEFAULT_WORK_START: &str = "09:00";
/// Default work-hours end when the provider omits it.
pub const DEFAULT_WORK_END: &str = "17:00";
/// Default lunch start when the provider omits it.
pub const DEFAULT_LUNCH_START: &str = "13:00";
/// Default lunch duration in minutes.
pub const DEFAULT_LUNCH_DURATION_MINUTES: i64 = 60;

/// User time preferences for one scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Earliest time of day tasks may be placed.
    pub work_start: NaiveTime,
    /// Latest time of day tasks may run until (exclusive).
    pub work_end: NaiveTime,
    /// Start of the lunch blackout.
    pub lunch_start: NaiveTime,
    /// Length of the lunch blackout in minutes.
    pub lunch_duration_minutes: i64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            work_start: parse_time(DEFAULT_WORK_START).unwrap_or(NaiveTime::MIN),
            work_end: parse_time(DEFAULT_WORK_END).unwrap_or(NaiveTime::MIN),
            lunch_start: parse_time(DEFAULT_LUNCH_START).unwrap_or(NaiveTime::MIN),
            lunch_duration_minutes: DEFAULT_LUNCH_DURATION_MINUTES,
        }
    }
}

impl Preferences {
    /// Creates preferences with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the work-hours window.
    pub fn with_work_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.work_start = start;
        self.work_end = end;
        self
    }

    /// Sets the lunch blackout.
    pub fn with_lunch(mut self, start: NaiveTime, duration_minutes: i64) -> Self {
        self.lunch_start = start;
        self.lunch_duration_minutes = duration_minutes;
        self
    }

    /// Builds preferences from the provider's string/int fields.
    ///
    /// `None` fields take the documented defaults; present fields must parse
    /// as `"HH:MM"`, otherwise `None` is returned.
    pub fn from_provider(
        work_hours_start: Option<&str>,
        work_hours_end: Option<&str>,
        lunch_time_start: Option<&str>,
        lunch_duration_minutes: Option<i64>,
    ) -> Option<Self> {
        Some(Self {
            work_start: parse_time(work_hours_start.unwrap_or(DEFAULT_WORK_START))?,
            work_end: parse_time(work_hours_end.unwrap_or(DEFAULT_WORK_END))?,
            lunch_start: parse_time(lunch_time_start.unwrap_or(DEFAULT_LUNCH_START))?,
            lunch_duration_minutes: lunch_duration_minutes
                .unwrap_or(DEFAULT_LUNCH_DURATION_MINUTES),
        })
    }
}

/// Parses a `"HH:MM"` time-of-day string.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.work_start, t(9, 0));
        assert_eq!(prefs.work_end, t(17, 0));
        assert_eq!(prefs.lunch_start, t(13, 0));
        assert_eq!(prefs.lunch_duration_minutes, 60);
    }

    #[test]
    fn test_builder() {
        let prefs = Preferences::new()
            .with_work_hours(t(8, 0), t(18, 0))
            .with_lunch(t(12, 30), 45);
        assert_eq!(prefs.work_start, t(8, 0));
        assert_eq!(prefs.work_end, t(18, 0));
        assert_eq!(prefs.lunch_start, t(12, 30));
        assert_eq!(prefs.lunch_duration_minutes, 45);
    }

    #[test]
    fn test_from_provider_partial() {
        let prefs =
            Preferences::from_provider(Some("08:30"), None, None, Some(30)).unwrap();
        assert_eq!(prefs.work_start, t(8, 30));
        assert_eq!(prefs.work_end, t(17, 0)); // default
        assert_eq!(prefs.lunch_duration_minutes, 30);
    }

    #[test]
    fn test_from_provider_unparseable() {
        assert!(Preferences::from_provider(Some("9am"), None, None, None).is_none());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:00"), Some(t(9, 0)));
        assert_eq!(parse_time(" 17:30 "), Some(t(17, 30)));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("noon"), None);
    }
}
