//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The assignee is not a `local@domain` address.
    #[error("invalid assignee email '{0}'")]
    InvalidAssignee(String),

    /// The priority value is not one of `low`, `medium` or `high`.
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    /// The reminder value is not one of the supported intervals.
    #[error("unknown reminder interval: {0}")]
    UnknownReminder(String),
}
