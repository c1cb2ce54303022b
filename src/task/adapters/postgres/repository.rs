//! `PostgreSQL` repository implementation for tasks and task history.

use super::{
    models::{HistoryRow, TaskRow},
    schema::{task_history, tasks},
};
use crate::auth::EmailAddress;
use crate::board::domain::ColumnId;
use crate::persistence::PgPool;
use crate::task::{
    domain::{
        HistoryEntryId, PersistedTaskData, Priority, ReminderInterval, Task, TaskHistoryEntry,
        TaskId, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, Timestamptz, Uuid as SqlUuid};

const CLAIM_DUE_REMINDERS_SQL: &str = concat!(
    "UPDATE tasks SET next_reminder_at = $3 ",
    "WHERE id IN (",
    "SELECT id FROM tasks ",
    "WHERE column_id = ANY($1) ",
    "AND reminder <> 'none' ",
    "AND next_reminder_at IS NOT NULL ",
    "AND next_reminder_at <= $2 ",
    "ORDER BY next_reminder_at ",
    "FOR UPDATE SKIP LOCKED) ",
    "RETURNING id, column_id, title, description, assignee, due_date, priority, ",
    "reminder, next_reminder_at, sort_order, created_at, updated_at",
);

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| update_row(connection, &row))
            .await
    }

    async fn update_all(&self, tasks_to_save: &[Task]) -> TaskRepositoryResult<()> {
        let rows = tasks_to_save
            .iter()
            .map(task_to_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                for row in &rows {
                    update_row(tx, row)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn tasks_in_column(&self, column_id: ColumnId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .order((tasks::sort_order.asc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn claim_due_reminders(
        &self,
        column_ids: &[ColumnId],
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        if column_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<uuid::Uuid> = column_ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            diesel::sql_query(CLAIM_DUE_REMINDERS_SQL)
                .bind::<Array<SqlUuid>, _>(ids)
                .bind::<Timestamptz, _>(now)
                .bind::<Timestamptz, _>(lease_until)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn set_next_reminder(
        &self,
        id: TaskId,
        next_reminder_at: Option<DateTime<Utc>>,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(tasks::next_reminder_at.eq(next_reminder_at))
                .execute(connection)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn append_history(&self, entry: &TaskHistoryEntry) -> TaskRepositoryResult<()> {
        let task_id = entry.task_id();
        let row = history_to_row(entry);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_history::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn history_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(id.into_inner()))
                .order(task_history::changed_at.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_history).collect())
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn update_row(connection: &mut PgConnection, row: &TaskRow) -> TaskRepositoryResult<()> {
    let updated = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
        .set(row)
        .execute(connection)?;
    if updated == 0 {
        return Err(TaskRepositoryError::NotFound(TaskId::from_uuid(row.id)));
    }
    Ok(())
}

fn task_to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        column_id: task.column_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        assignee: task.assignee().map(|email| email.as_str().to_owned()),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        reminder: task.reminder().as_str().to_owned(),
        next_reminder_at: task.next_reminder_at(),
        sort_order: i32::try_from(task.sort_order()).map_err(TaskRepositoryError::persistence)?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        column_id,
        title,
        description,
        assignee,
        due_date,
        priority,
        reminder,
        next_reminder_at,
        sort_order,
        created_at,
        updated_at,
    } = row;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        column_id: ColumnId::from_uuid(column_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        assignee: assignee
            .map(EmailAddress::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        due_date,
        priority: Priority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?,
        reminder: ReminderInterval::try_from(reminder.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        next_reminder_at,
        sort_order: u32::try_from(sort_order).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    }))
}

fn history_to_row(entry: &TaskHistoryEntry) -> HistoryRow {
    HistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        description: entry.description().to_owned(),
        actor: entry.actor().to_owned(),
        changed_at: entry.changed_at(),
    }
}

fn row_to_history(row: HistoryRow) -> TaskHistoryEntry {
    TaskHistoryEntry::from_persisted(
        HistoryEntryId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        row.description,
        row.actor,
        row.changed_at,
    )
}
