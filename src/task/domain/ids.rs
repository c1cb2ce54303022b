//! Identifier types for the task domain.

use crate::identifier::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);

uuid_identifier!(
    /// Unique identifier for a task-history entry.
    HistoryEntryId
);
