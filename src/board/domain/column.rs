//! Column entity.

use super::{BoardDomainError, BoardId, ColumnId, Lane};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed column title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTitle(String);

impl ColumnTitle {
    /// Creates a validated column title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] when the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named lane of a board holding ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    title: ColumnTitle,
    sort_order: u32,
}

impl Column {
    /// Creates a new column at `sort_order` within `board_id`.
    #[must_use]
    pub fn new(board_id: BoardId, title: ColumnTitle, sort_order: u32) -> Self {
        Self {
            id: ColumnId::new(),
            board_id,
            title,
            sort_order,
        }
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ColumnId,
        board_id: BoardId,
        title: ColumnTitle,
        sort_order: u32,
    ) -> Self {
        Self {
            id,
            board_id,
            title,
            sort_order,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &ColumnTitle {
        &self.title
    }

    /// Returns the display position within the board.
    #[must_use]
    pub const fn sort_order(&self) -> u32 {
        self.sort_order
    }

    /// Returns the workflow lane of this column.
    #[must_use]
    pub fn lane(&self) -> Lane {
        Lane::from_title(self.title.as_str())
    }

    /// Renames the column.
    pub fn rename(&mut self, title: ColumnTitle) {
        self.title = title;
    }
}
