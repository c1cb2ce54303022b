//! Diesel row models for board persistence.

use super::schema::{board_columns, boards};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for board records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// CSS color token.
    pub color: String,
    /// Identity-provider id of the owner.
    pub owner_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for column records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Display position within the board.
    pub sort_order: i32,
}
