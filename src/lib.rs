//! Time-blocking day planner engine.
//!
//! Turns an unstructured task list (durations, priorities, deadlines, soft
//! constraints) into a concrete time-slotted plan over a multi-day horizon,
//! respecting existing busy blocks and user time preferences. Tasks that
//! cannot be placed come back as conflicts for human resolution.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `CalendarEvent`, `Preferences`,
//!   `TimeWindow`, `ScheduledTask`, `SchedulingConflict`, `SchedulingResult`
//! - **`grid`**: The availability grid — slot rows per day, preference
//!   blackouts, busy blocks, candidate window enumeration
//! - **`selection`**: Pluggable slot-selection strategies — deterministic
//!   earliest-fit and a timeout-guarded advisory strategy whose answers are
//!   re-validated before use
//! - **`engine`**: The placement engine — deterministic ordering, candidate
//!   search, grid mutation, conflict accumulation
//! - **`workflow`**: The bounded-retry orchestration state machine around
//!   decomposition, scheduling, conflict resolution, and integration
//! - **`validation`**: Structural input checks (empty lists, duplicate ids,
//!   non-positive durations)
//!
//! # Architecture
//!
//! Data flows one way: tasks + preferences + busy blocks → availability
//! grid → candidate windows → selected window → mutated grid → plan and
//! conflicts → workflow routing. One grid is owned by one invocation and
//! mutated strictly sequentially; concurrent requests each build their own.

pub mod engine;
pub mod error;
pub mod grid;
pub mod models;
pub mod selection;
pub mod validation;
pub mod workflow;
