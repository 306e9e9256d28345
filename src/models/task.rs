//! Task model.
//!
//! A task is a unit of work to place on the grid: a duration, an urgency,
//! an optional deadline, and free-text constraints. Tasks are produced by
//! the decomposition step (or deserialized from persisted input) and are
//! consumed read-only by the scheduling engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A task to be placed on the availability grid.
///
/// # Priority Convention
/// Lower is more urgent: 1 = high, 2 = medium, 3 = low. This matches the
/// vocabulary of the decomposition step upstream.
///
/// # Constraints
/// `constraints` holds free-text strings such as `"after 17:00"` or
/// `"time flexible"`. They are opaque to the grid; the selection layer
/// parses the recognized time-of-day forms and checks them before a
/// candidate window is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Required duration in minutes. Must be positive.
    pub duration_minutes: i64,
    /// Urgency (lower = more urgent).
    pub priority: i32,
    /// Soft end-bound used for ordering only. `None` = no deadline.
    pub deadline: Option<NaiveDateTime>,
    /// Where the task happens, if anywhere specific.
    pub location: Option<String>,
    /// Grouping category (e.g. "work", "exercise"). Used only by the
    /// selection strategy, never by placement validity.
    pub category: Option<String>,
    /// Free-text scheduling constraints from the decomposition step.
    pub constraints: Vec<String>,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Task {
    /// Creates a new task with the given ID, description, and duration.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            duration_minutes,
            priority: 2,
            deadline: None,
            location: None,
            category: None,
            constraints: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the priority (lower = more urgent).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: NaiveDateTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a free-text constraint.
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Parses the decomposition step's priority vocabulary.
///
/// `"high"` → 1, `"medium"` → 2, `"low"` → 3. Unknown strings map to
/// medium, matching the upstream default.
pub fn priority_from_label(label: &str) -> i32 {
    match label.trim().to_ascii_lowercase().as_str() {
        "high" => 1,
        "low" => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_task_builder() {
        let deadline = NaiveDate::from_ymd_opt(2024, 6, 7)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        let task = Task::new("t1", "Draft Q4 report", 90)
            .with_priority(1)
            .with_deadline(deadline)
            .with_location("office")
            .with_category("work")
            .with_constraint("before EOD")
            .with_attribute("energy_required", "high");

        assert_eq!(task.id, "t1");
        assert_eq!(task.description, "Draft Q4 report");
        assert_eq!(task.duration_minutes, 90);
        assert_eq!(task.priority, 1);
        assert_eq!(task.deadline, Some(deadline));
        assert_eq!(task.location.as_deref(), Some("office"));
        assert_eq!(task.category.as_deref(), Some("work"));
        assert_eq!(task.constraints, vec!["before EOD".to_string()]);
        assert_eq!(
            task.attributes.get("energy_required"),
            Some(&"high".to_string())
        );
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("t1", "errand", 30);
        assert_eq!(task.priority, 2);
        assert!(task.deadline.is_none());
        assert!(task.constraints.is_empty());
    }

    #[test]
    fn test_priority_from_label() {
        assert_eq!(priority_from_label("high"), 1);
        assert_eq!(priority_from_label("Medium"), 2);
        assert_eq!(priority_from_label("LOW"), 3);
        assert_eq!(priority_from_label("whatever"), 2);
    }
}
