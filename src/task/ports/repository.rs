//! Repository port for task and task-history persistence.

use crate::board::domain::ColumnId;
use crate::task::domain::{Task, TaskHistoryEntry, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists every field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists several tasks atomically, as after a reorder.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when any task does not
    /// exist; no task is changed in that case.
    async fn update_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists the tasks of a column ordered by position.
    async fn tasks_in_column(&self, column_id: ColumnId) -> TaskRepositoryResult<Vec<Task>>;

    /// Claims tasks in `column_ids` whose reminder is enabled and due at
    /// `now`.
    ///
    /// Claimed tasks have `next_reminder_at` pushed to `lease_until` before
    /// they are returned, so a concurrent claim does not select them again.
    /// The returned tasks carry the leased schedule.
    async fn claim_due_reminders(
        &self,
        column_ids: &[ColumnId],
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Sets only the reminder schedule of a task, leaving other fields as
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn set_next_reminder(
        &self,
        id: TaskId,
        next_reminder_at: Option<DateTime<Utc>>,
    ) -> TaskRepositoryResult<()>;

    /// Appends a history entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn append_history(&self, entry: &TaskHistoryEntry) -> TaskRepositoryResult<()>;

    /// Lists the history of a task, newest first.
    async fn history_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
