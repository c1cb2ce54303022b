//! Repository port for board and column persistence.

use crate::board::domain::{Board, BoardId, Column, ColumnId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board and column persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board together with its initial columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the board ID
    /// already exists.
    async fn store_board(&self, board: &Board, columns: &[Column]) -> BoardRepositoryResult<()>;

    /// Persists title and color edits of an existing board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does not
    /// exist.
    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Finds a board by identifier.
    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Lists boards owned by `owner_id`, newest first.
    async fn boards_for_owner(&self, owner_id: &str) -> BoardRepositoryResult<Vec<Board>>;

    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the owning board
    /// does not exist.
    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Persists a renamed column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does
    /// not exist.
    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Finds a column by identifier.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Lists the columns of a board ordered by position.
    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>>;

    /// Lists columns, across all boards, whose title is one of `titles`.
    async fn columns_with_titles(&self, titles: &[&str]) -> BoardRepositoryResult<Vec<Column>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
