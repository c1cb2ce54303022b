//! Service layer for task creation, editing, moves and history.

use crate::auth::{Actor, EmailAddress};
use crate::board::{
    domain::{Column, ColumnId},
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::task::{
    domain::{
        NewTask, Priority, ReminderInterval, ReminderTransition, Task, TaskDomainError,
        TaskHistoryEntry, TaskId, TaskPatch, TaskTitle, describe_move, describe_update,
    },
    ports::{TaskNotifier, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

const ANONYMOUS_ACTOR: &str = "anonymous";

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    reminder: ReminderInterval,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            assignee: None,
            due_date: None,
            priority: Priority::default(),
            reminder: ReminderInterval::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee email address.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the reminder interval.
    #[must_use]
    pub const fn with_reminder(mut self, reminder: ReminderInterval) -> Self {
        self.reminder = reminder;
        self
    }

    fn into_fields(self) -> Result<NewTask, TaskDomainError> {
        Ok(NewTask {
            title: TaskTitle::new(self.title)?,
            description: self.description.filter(|text| !text.trim().is_empty()),
            assignee: parse_assignee(self.assignee)?,
            due_date: self.due_date,
            priority: self.priority,
            reminder: self.reminder,
        })
    }
}

/// Request payload for a partial task update.
///
/// Outer `None` leaves a field untouched; for nullable fields `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// New title.
    pub title: Option<String>,
    /// New or cleared description.
    pub description: Option<Option<String>>,
    /// New or cleared assignee email address.
    pub assignee: Option<Option<String>>,
    /// New or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New reminder interval.
    pub reminder: Option<ReminderInterval>,
    /// Explicit next reminder time.
    pub next_reminder_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        Ok(TaskPatch {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self
                .description
                .map(|value| value.filter(|text| !text.trim().is_empty())),
            assignee: self.assignee.map(parse_assignee).transpose()?,
            due_date: self.due_date,
            priority: self.priority,
            reminder: self.reminder,
            next_reminder_at: self.next_reminder_at,
        })
    }
}

fn parse_assignee(raw: Option<String>) -> Result<Option<EmailAddress>, TaskDomainError> {
    match raw {
        Some(value) if !value.trim().is_empty() => EmailAddress::new(value)
            .map(Some)
            .map_err(|err| TaskDomainError::InvalidAssignee(err.0)),
        _ => Ok(None),
    }
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task was moved and all affected positions persisted.
    Moved(Task),
    /// The task already sits at the requested position; nothing persisted.
    Unchanged(Task),
    /// The move breaks the lane rules; nothing persisted.
    Rejected,
}

impl MoveOutcome {
    /// Returns whether the store changed.
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    /// Returns the task after the move, unless the move was rejected.
    #[must_use]
    pub const fn task(&self) -> Option<&Task> {
        match self {
            Self::Moved(task) | Self::Unchanged(task) => Some(task),
            Self::Rejected => None,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Column lookup failed.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),
    /// The operation requires an authenticated caller.
    #[error("authentication required")]
    Unauthorized,
    /// The caller's role may not perform the operation.
    #[error("you do not have permission to edit tasks")]
    Forbidden,
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// No column exists with the given identifier.
    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, B, C>
where
    R: TaskRepository,
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    boards: Arc<B>,
    clock: Arc<C>,
    notifier: Option<Arc<dyn TaskNotifier>>,
}

impl<R, B, C> TaskLifecycleService<R, B, C>
where
    R: TaskRepository,
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service without notifications.
    #[must_use]
    pub const fn new(repository: Arc<R>, boards: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            repository,
            boards,
            clock,
            notifier: None,
        }
    }

    /// Attaches a notifier invoked after each task creation.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn TaskNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Creates a task at the end of `column_id`.
    ///
    /// Notification failures are logged and do not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an empty title or invalid
    /// assignee, [`TaskLifecycleError::ColumnNotFound`] for unknown columns,
    /// or repository errors.
    #[tracing::instrument(skip(self, request, actor), fields(column_id = %column_id))]
    pub async fn create(
        &self,
        column_id: ColumnId,
        request: CreateTaskRequest,
        actor: Option<&Actor>,
    ) -> TaskLifecycleResult<Task> {
        let fields = request.into_fields()?;
        self.column_or_error(column_id).await?;
        let siblings = self.repository.tasks_in_column(column_id).await?;
        let task = Task::new(column_id, fields, position(siblings.len()), &*self.clock);

        self.repository.store(&task).await?;
        self.record(task.id(), "created", actor).await?;
        tracing::info!(task_id = %task.id(), "created task");

        let notified = match &self.notifier {
            Some(notifier) => notifier.task_created(&task, actor).await,
            None => Ok(()),
        };
        if let Err(err) = notified {
            tracing::warn!(task_id = %task.id(), error = %err, "task notification failed");
        }
        Ok(task)
    }

    /// Applies a partial update on behalf of an admin or superadmin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Unauthorized`] without an actor,
    /// [`TaskLifecycleError::Forbidden`] for members,
    /// [`TaskLifecycleError::TaskNotFound`] for unknown tasks, validation or
    /// repository errors.
    #[tracing::instrument(skip(self, request, actor))]
    pub async fn update(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
        actor: Option<&Actor>,
    ) -> TaskLifecycleResult<Task> {
        let editor = actor.ok_or(TaskLifecycleError::Unauthorized)?;
        if !editor.role().can_edit_tasks() {
            return Err(TaskLifecycleError::Forbidden);
        }
        let patch = request.into_patch()?;
        let mut task = self.find_or_error(task_id).await?;

        let changed = task.apply_patch(patch, &*self.clock);
        if changed.is_empty() {
            return Ok(task);
        }
        self.repository.update(&task).await?;
        self.record(task_id, &describe_update(&changed), actor).await?;
        Ok(task)
    }

    /// Moves a task to `index` within `target_column`.
    ///
    /// The index is clamped to the target column. Positions in both columns
    /// are renumbered from zero. Moves back into `To Do` from a later lane
    /// are rejected without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or
    /// [`TaskLifecycleError::ColumnNotFound`] for unknown identifiers or a
    /// target column on another board, or repository errors.
    #[tracing::instrument(skip(self, actor))]
    pub async fn move_task(
        &self,
        task_id: TaskId,
        target_column: ColumnId,
        index: usize,
        actor: Option<&Actor>,
    ) -> TaskLifecycleResult<MoveOutcome> {
        let task = self.find_or_error(task_id).await?;
        let source = self.column_or_error(task.column_id()).await?;
        let target = self.column_or_error(target_column).await?;
        if source.board_id() != target.board_id() {
            return Err(TaskLifecycleError::ColumnNotFound(target_column));
        }

        if !source.lane().allows_move_to(target.lane()) {
            tracing::warn!(
                from = %source.title(),
                to = %target.title(),
                "tasks cannot move back to the backlog"
            );
            return Ok(MoveOutcome::Rejected);
        }

        if source.id() == target.id() {
            return self.reorder_within(task, index).await;
        }
        self.move_across(task, &source, &target, index, actor).await
    }

    /// Lists the history of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks or
    /// repository errors.
    pub async fn history(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<TaskHistoryEntry>> {
        self.find_or_error(task_id).await?;
        Ok(self.repository.history_for_task(task_id).await?)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists the tasks of a column in display order.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn tasks_in_column(&self, column_id: ColumnId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.tasks_in_column(column_id).await?)
    }

    async fn reorder_within(&self, task: Task, index: usize) -> TaskLifecycleResult<MoveOutcome> {
        let mut column = self.repository.tasks_in_column(task.column_id()).await?;
        let Some(current) = column.iter().position(|candidate| candidate.id() == task.id()) else {
            return Err(TaskLifecycleError::TaskNotFound(task.id()));
        };
        let moved = column.remove(current);
        let target_index = index.min(column.len());
        if target_index == current {
            return Ok(MoveOutcome::Unchanged(task));
        }
        column.insert(target_index, moved);

        let changed = renumber(&mut column);
        self.repository.update_all(&changed).await?;
        column
            .into_iter()
            .find(|candidate| candidate.id() == task.id())
            .map(MoveOutcome::Moved)
            .ok_or(TaskLifecycleError::TaskNotFound(task.id()))
    }

    async fn move_across(
        &self,
        mut task: Task,
        source: &Column,
        target: &Column,
        index: usize,
        actor: Option<&Actor>,
    ) -> TaskLifecycleResult<MoveOutcome> {
        let mut remaining = self.repository.tasks_in_column(source.id()).await?;
        remaining.retain(|candidate| candidate.id() != task.id());
        let mut destination = self.repository.tasks_in_column(target.id()).await?;

        let target_index = index.min(destination.len());
        task.relocate(target.id(), position(target_index));
        if task.reminder().is_enabled() {
            match ReminderTransition::between(source.lane(), target.lane()) {
                ReminderTransition::Restart => task.restart_reminders(&*self.clock),
                ReminderTransition::Stop => task.stop_reminders(&*self.clock),
                ReminderTransition::Keep => {}
            }
        }
        let task_id = task.id();
        destination.insert(target_index, task);

        let mut changed = renumber(&mut remaining);
        changed.extend(renumber_with(&mut destination, task_id));
        self.repository.update_all(&changed).await?;
        self.record(
            task_id,
            &describe_move(source.title().as_str(), target.title().as_str()),
            actor,
        )
        .await?;

        destination
            .into_iter()
            .find(|candidate| candidate.id() == task_id)
            .map(MoveOutcome::Moved)
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn find_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn column_or_error(&self, column_id: ColumnId) -> TaskLifecycleResult<Column> {
        self.boards
            .find_column(column_id)
            .await?
            .ok_or(TaskLifecycleError::ColumnNotFound(column_id))
    }

    async fn record(
        &self,
        task_id: TaskId,
        description: &str,
        actor: Option<&Actor>,
    ) -> TaskLifecycleResult<()> {
        let label = actor.map_or(ANONYMOUS_ACTOR, Actor::display_name);
        let entry = TaskHistoryEntry::record(task_id, description, label, &*self.clock);
        self.repository.append_history(&entry).await?;
        Ok(())
    }
}

fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Renumbers `tasks` densely from zero and returns those whose position
/// changed.
fn renumber(tasks: &mut [Task]) -> Vec<Task> {
    renumber_matching(tasks, |_| false)
}

/// Like [`renumber`], but always includes the task `always`.
fn renumber_with(tasks: &mut [Task], always: TaskId) -> Vec<Task> {
    renumber_matching(tasks, |task| task.id() == always)
}

fn renumber_matching(tasks: &mut [Task], include: impl Fn(&Task) -> bool) -> Vec<Task> {
    let mut changed = Vec::new();
    for (index, task) in tasks.iter_mut().enumerate() {
        let expected = position(index);
        if task.sort_order() != expected || include(task) {
            task.set_sort_order(expected);
            changed.push(task.clone());
        }
    }
    changed
}
