//! Task filters applied to the loaded board.

use crate::task::domain::{Priority, Task};
use chrono::NaiveDate;

/// Narrows the visible tasks by priority and due date.
///
/// An empty priority list shows every priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    priorities: Vec<Priority>,
    due_on: Option<NaiveDate>,
}

impl TaskFilter {
    /// Creates a filter that shows every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows only tasks with one of `priorities`.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self.priorities.sort_by_key(|priority| priority.as_str());
        self.priorities.dedup();
        self
    }

    /// Shows only tasks due on `date`.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_on = Some(date);
        self
    }

    /// Returns whether the filter hides nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.priorities.is_empty() && self.due_on.is_none()
    }

    /// Returns whether `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let priority_ok =
            self.priorities.is_empty() || self.priorities.contains(&task.priority());
        let due_ok = self.due_on.is_none_or(|date| task.due_date() == Some(date));
        priority_ok && due_ok
    }
}
