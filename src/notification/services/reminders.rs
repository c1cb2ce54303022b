//! Recurring reminder dispatcher.

use crate::board::{
    domain::{ACTIVE_COLUMN_TITLES, Column, ColumnId},
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::notification::{domain::EmailComposer, ports::Mailer};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Default time a claimed reminder is held before another pass may retry.
pub const DEFAULT_LEASE: TimeDelta = TimeDelta::minutes(5);

/// Counts reported by one dispatcher pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSummary {
    /// Reminder emails delivered.
    pub sent: usize,
    /// Due tasks without an assignee, rescheduled without an email.
    pub skipped: usize,
    /// Tasks whose email or rescheduling failed.
    pub failed: usize,
}

impl ReminderSummary {
    /// Human-readable outcome of the pass.
    #[must_use]
    pub fn message(&self) -> String {
        if self.sent == 0 && self.skipped == 0 && self.failed == 0 {
            "No reminders to send at this time.".to_owned()
        } else {
            format!("Sent {} reminders.", self.sent)
        }
    }
}

/// Errors that abort a whole dispatcher pass.
#[derive(Debug, Error)]
pub enum ReminderDispatchError {
    /// Another pass holds the run guard.
    #[error("a reminder pass is already running")]
    AlreadyRunning,
    /// Active columns could not be resolved.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),
    /// Due tasks could not be claimed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

enum Delivery {
    Sent,
    NoAssignee,
}

/// Sends due reminder emails and schedules the next ones.
///
/// Each pass holds an in-process run guard, and due tasks are claimed with
/// a lease in the store so passes in other processes skip them.
pub struct ReminderDispatcher<R, B, M, C>
where
    R: TaskRepository,
    B: BoardRepository,
    M: Mailer,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    boards: Arc<B>,
    mailer: Arc<M>,
    composer: Arc<EmailComposer>,
    clock: Arc<C>,
    lease: TimeDelta,
    guard: Arc<Mutex<()>>,
}

impl<R, B, M, C> Clone for ReminderDispatcher<R, B, M, C>
where
    R: TaskRepository,
    B: BoardRepository,
    M: Mailer,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            boards: Arc::clone(&self.boards),
            mailer: Arc::clone(&self.mailer),
            composer: Arc::clone(&self.composer),
            clock: Arc::clone(&self.clock),
            lease: self.lease,
            guard: Arc::clone(&self.guard),
        }
    }
}

impl<R, B, M, C> ReminderDispatcher<R, B, M, C>
where
    R: TaskRepository,
    B: BoardRepository,
    M: Mailer,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher with the default lease.
    #[must_use]
    pub fn new(
        tasks: Arc<R>,
        boards: Arc<B>,
        mailer: Arc<M>,
        composer: Arc<EmailComposer>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            boards,
            mailer,
            composer,
            clock,
            lease: DEFAULT_LEASE,
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// Overrides the claim lease.
    #[must_use]
    pub const fn with_lease(mut self, lease: TimeDelta) -> Self {
        self.lease = lease;
        self
    }

    /// Runs one pass over every due reminder in the active lanes.
    ///
    /// A failure for one task is logged and counted; the remaining tasks
    /// are still processed. A task whose email failed keeps its lease, so
    /// it is retried once the lease expires.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderDispatchError::AlreadyRunning`] when a pass is in
    /// progress, or the store error when columns or tasks cannot be read.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<ReminderSummary, ReminderDispatchError> {
        let Ok(_running) = self.guard.try_lock() else {
            tracing::info!("reminder pass skipped: previous pass still running");
            return Err(ReminderDispatchError::AlreadyRunning);
        };

        let columns = self.boards.columns_with_titles(&ACTIVE_COLUMN_TITLES).await?;
        let column_ids: Vec<ColumnId> = columns.iter().map(Column::id).collect();
        let now = self.clock.utc();
        let claimed = self
            .tasks
            .claim_due_reminders(&column_ids, now, now + self.lease)
            .await?;

        let mut summary = ReminderSummary::default();
        for task in claimed {
            match self.deliver(&task, now).await {
                Ok(Delivery::Sent) => summary.sent += 1,
                Ok(Delivery::NoAssignee) => summary.skipped += 1,
                Err(message) => {
                    tracing::warn!(task_id = %task.id(), error = %message, "reminder email failed");
                    summary.failed += 1;
                    continue;
                }
            }
            if let Err(err) = self.reschedule(&task, now).await {
                tracing::warn!(task_id = %task.id(), error = %err, "reminder reschedule failed");
                summary.failed += 1;
            }
        }

        tracing::info!(
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "reminder pass finished"
        );
        Ok(summary)
    }

    async fn deliver(&self, task: &Task, now: DateTime<Utc>) -> Result<Delivery, String> {
        let Some(message) = self
            .composer
            .reminder(task, now)
            .map_err(|err| err.to_string())?
        else {
            return Ok(Delivery::NoAssignee);
        };
        self.mailer
            .send(&message)
            .await
            .map_err(|err| err.to_string())?;
        tracing::debug!(task_id = %task.id(), subject = %message.subject, "sent reminder");
        Ok(Delivery::Sent)
    }

    async fn reschedule(&self, task: &Task, now: DateTime<Utc>) -> Result<(), TaskRepositoryError> {
        let next = task.reminder().offset().map(|offset| now + offset);
        self.tasks.set_next_reminder(task.id(), next).await
    }
}
