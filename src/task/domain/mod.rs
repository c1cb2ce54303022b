//! Domain model for kanban tasks.
//!
//! Tasks live in exactly one column at a time and carry the fields that
//! drive reminder scheduling. All infrastructure concerns stay outside the
//! domain boundary.

mod error;
mod fields;
mod history;
mod ids;
mod schedule;
mod task;

pub use error::TaskDomainError;
pub use fields::{Priority, ReminderInterval, TaskTitle};
pub use history::{TaskHistoryEntry, describe_move, describe_update};
pub use ids::{HistoryEntryId, TaskId};
pub use schedule::ReminderTransition;
pub use task::{FIRST_REMINDER_DELAY, NewTask, PersistedTaskData, Task, TaskField, TaskPatch};
