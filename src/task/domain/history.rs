//! Append-only task history entries.

use super::{HistoryEntryId, TaskField, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One immutable record of a change to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    description: String,
    actor: String,
    changed_at: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Records a change made by `actor` now.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        description: impl Into<String>,
        actor: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            description: description.into(),
            actor: actor.into(),
            changed_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: HistoryEntryId,
        task_id: TaskId,
        description: String,
        actor: String,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            description,
            actor,
            changed_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the change description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns who made the change.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Returns when the change was made.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }
}

/// Describes an update touching `fields`, such as `updated title, priority`.
#[must_use]
pub fn describe_update(fields: &[TaskField]) -> String {
    let labels: Vec<&str> = fields.iter().map(|field| field.label()).collect();
    format!("updated {}", labels.join(", "))
}

/// Describes a move between two named columns.
#[must_use]
pub fn describe_move(from: &str, to: &str) -> String {
    format!("moved from {from} to {to}")
}
