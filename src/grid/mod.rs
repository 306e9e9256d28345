//! Availability grid: slots, construction, and candidate windows.
//!
//! The grid is the core spatial structure of a scheduling pass: a
//! contiguous, strictly increasing sequence of fixed-granularity slots
//! covering whole days. Preference blackouts and busy blocks are applied
//! at build time; placement consumes slots as tasks land.
//!
//! # Ownership
//! One grid per scheduling invocation, owned by one call stack. Mutation
//! is strictly sequential so each placement is visible to the next task's
//! candidate search.

mod builder;
mod candidates;
mod slot;

pub use builder::{GridBuilder, DEFAULT_GRANULARITY_MINUTES};
pub use candidates::{find_candidates, required_slots, CandidateWindow};
pub use slot::{AvailabilityGrid, TimeSlot};
