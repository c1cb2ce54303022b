//! Lane classification of columns by title.
//!
//! Reminder scheduling and move rules key off the well-known column titles
//! created with every board. Columns with any other title are
//! [`Lane::Other`] and belong to neither the active nor the inactive set.

use serde::{Deserialize, Serialize};

/// Title of the backlog lane.
pub const TO_DO: &str = "To Do";
/// Title of the work-in-progress lane.
pub const IN_PROGRESS: &str = "In Progress";
/// Title of the review lane.
pub const REVIEW: &str = "Review";
/// Title of the completed lane.
pub const DONE: &str = "Done";

/// Column titles created with every new board, in display order.
pub const DEFAULT_COLUMN_TITLES: [&str; 4] = [TO_DO, IN_PROGRESS, REVIEW, DONE];

/// Titles of the lanes in which reminders fire.
pub const ACTIVE_COLUMN_TITLES: [&str; 2] = [TO_DO, IN_PROGRESS];

/// Workflow lane derived from a column title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// `To Do`.
    ToDo,
    /// `In Progress`.
    InProgress,
    /// `Review`.
    Review,
    /// `Done`.
    Done,
    /// Any user-defined column.
    Other,
}

impl Lane {
    /// Classifies a column title. Matching is exact, as titles are stored.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        match title {
            TO_DO => Self::ToDo,
            IN_PROGRESS => Self::InProgress,
            REVIEW => Self::Review,
            DONE => Self::Done,
            _ => Self::Other,
        }
    }

    /// Returns whether reminders fire for tasks in this lane.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::ToDo | Self::InProgress)
    }

    /// Returns whether reminders are stopped for tasks in this lane.
    #[must_use]
    pub const fn is_inactive(self) -> bool {
        matches!(self, Self::Review | Self::Done)
    }

    /// Returns whether a task may move from `self` into `target`.
    ///
    /// Work that has started never returns to `To Do`.
    #[must_use]
    pub const fn allows_move_to(self, target: Self) -> bool {
        !matches!(
            (self, target),
            (Self::InProgress | Self::Review | Self::Done, Self::ToDo)
        )
    }
}
