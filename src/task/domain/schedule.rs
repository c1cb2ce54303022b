//! Reminder scheduling rules for tasks changing lanes.

use crate::board::domain::Lane;

/// Effect of a lane change on a task's reminder schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTransition {
    /// The task entered the active lanes from outside them.
    Restart,
    /// The task entered the inactive lanes from outside them.
    Stop,
    /// The schedule is left untouched.
    Keep,
}

impl ReminderTransition {
    /// Determines the reminder effect of moving from `from` to `to`.
    #[must_use]
    pub const fn between(from: Lane, to: Lane) -> Self {
        if to.is_active() && !from.is_active() {
            Self::Restart
        } else if to.is_inactive() && !from.is_inactive() {
            Self::Stop
        } else {
            Self::Keep
        }
    }
}
