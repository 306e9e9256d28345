//! Scheduling domain models.
//!
//! Core data types for one day-planning request: the tasks to place, the
//! busy blocks and preferences that shape availability, and the plan /
//! conflict output of a scheduling pass.
//!
//! All instants are timezone-naive; the caller guarantees one consistent
//! timezone per request.

mod event;
mod plan;
mod preferences;
mod task;
mod window;

pub use event::CalendarEvent;
pub use plan::{ConflictReason, ScheduledTask, SchedulingConflict, SchedulingResult};
pub use preferences::{
    parse_time, Preferences, DEFAULT_LUNCH_DURATION_MINUTES, DEFAULT_LUNCH_START,
    DEFAULT_WORK_END, DEFAULT_WORK_START,
};
pub use task::{priority_from_label, Task};
pub use window::TimeWindow;
