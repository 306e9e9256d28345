//! Free-text task constraint parsing and checking.
//!
//! The decomposition step attaches strings such as `"at 15:00"`,
//! `"after 5pm"`, or `"before EOD"` to a task. The grid never sees them;
//! the selection layer parses the recognized time-of-day forms here and
//! checks them before accepting a candidate window. Unrecognized strings
//! (e.g. `"time flexible"`) are non-binding notes.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::TimeWindow;

/// A parsed time-of-day constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeConstraint {
    /// The window must start exactly at this time of day.
    At(NaiveTime),
    /// The window must start at or after this time of day.
    After(NaiveTime),
    /// The window must end by this time of day.
    Before(NaiveTime),
    /// The window must end by midnight of the horizon's first day.
    BeforeEndOfDay,
}

impl TimeConstraint {
    /// Whether `window` satisfies this constraint.
    ///
    /// `horizon_start` anchors the end-of-day bound; the time-of-day bounds
    /// are evaluated against the window's own day.
    pub fn allows(&self, window: &TimeWindow, horizon_start: NaiveDate) -> bool {
        let day = window.start.date();
        match self {
            TimeConstraint::At(time) => window.start.time() == *time,
            TimeConstraint::After(time) => window.start >= day.and_time(*time),
            TimeConstraint::Before(time) => window.end <= day.and_time(*time),
            TimeConstraint::BeforeEndOfDay => {
                window.end <= horizon_start.and_time(NaiveTime::MIN) + Duration::days(1)
            }
        }
    }
}

/// The binding constraints parsed from one task.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<TimeConstraint>,
}

impl ConstraintSet {
    /// Parses a task's constraint strings, keeping the recognized forms.
    pub fn parse(texts: &[String]) -> Self {
        Self {
            constraints: texts.iter().filter_map(|t| parse_constraint(t)).collect(),
        }
    }

    /// Whether no binding constraint was recognized.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Whether `window` satisfies every binding constraint.
    pub fn allows(&self, window: &TimeWindow, horizon_start: NaiveDate) -> bool {
        self.constraints
            .iter()
            .all(|c| c.allows(window, horizon_start))
    }
}

/// Parses a single constraint string.
///
/// Recognized forms: `"at <time>"`, `"after <time>"`, `"before <time>"`,
/// `"before EOD"`. Anything else returns `None`.
pub fn parse_constraint(text: &str) -> Option<TimeConstraint> {
    let lowered = text.trim().to_ascii_lowercase();

    if let Some(rest) = lowered.strip_prefix("at ") {
        return parse_time_of_day(rest).map(TimeConstraint::At);
    }
    if let Some(rest) = lowered.strip_prefix("after ") {
        return parse_time_of_day(rest).map(TimeConstraint::After);
    }
    if let Some(rest) = lowered.strip_prefix("before ") {
        let rest = rest.trim();
        if rest == "eod" || rest == "end of day" {
            return Some(TimeConstraint::BeforeEndOfDay);
        }
        return parse_time_of_day(rest).map(TimeConstraint::Before);
    }
    None
}

/// Parses `"17:00"`, `"5pm"`, or `"5:30pm"` style times of day.
fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M") {
        return Some(time);
    }

    let (digits, pm) = match text.strip_suffix("pm") {
        Some(rest) => (rest.trim(), true),
        None => (text.strip_suffix("am")?.trim(), false),
    };
    let (hour_str, minute_str) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None => (digits, "0"),
    };
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}
