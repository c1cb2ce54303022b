//! Diesel row models for task persistence.

use super::schema::{task_history, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result, claim result and insert row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Assignee email address.
    pub assignee: Option<String>,
    /// Calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Priority label.
    pub priority: String,
    /// Reminder interval label.
    pub reminder: String,
    /// Next reminder time.
    pub next_reminder_at: Option<DateTime<Utc>>,
    /// Position within the column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for history records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Change description.
    pub description: String,
    /// Who made the change.
    pub actor: String,
    /// When the change was made.
    pub changed_at: DateTime<Utc>,
}
