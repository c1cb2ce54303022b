//! Side-effect port invoked after a task is created.

use crate::auth::Actor;
use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Receives newly created tasks for best-effort notification.
///
/// Failures are reported to the caller for logging only; they never undo
/// the task creation.
#[async_trait]
pub trait TaskNotifier: Send + Sync {
    /// Notifies interested parties about a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskNotifierError`] when any notification failed.
    async fn task_created(&self, task: &Task, creator: Option<&Actor>)
    -> Result<(), TaskNotifierError>;
}

/// Failure reported by a [`TaskNotifier`].
#[derive(Debug, Clone, Error)]
#[error("task notification failed: {0}")]
pub struct TaskNotifierError(pub Arc<dyn std::error::Error + Send + Sync>);

impl TaskNotifierError {
    /// Wraps a notification error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
