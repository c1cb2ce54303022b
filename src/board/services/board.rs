//! Service layer for board and column management.

use crate::board::{
    domain::{
        Board, BoardColor, BoardDomainError, BoardId, BoardTitle, Column, ColumnId, ColumnTitle,
        DEFAULT_COLUMN_TITLES,
    },
    ports::{BoardRepository, BoardRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    owner_id: String,
    title: String,
    color: Option<String>,
}

impl CreateBoardRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            title: title.into(),
            color: None,
        }
    }

    /// Sets the board color token.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Request payload for editing a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBoardRequest {
    /// New title, if changing.
    pub title: Option<String>,
    /// New color token, if changing.
    pub color: Option<String>,
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// No board exists with the given identifier.
    #[error("board {0} not found")]
    BoardNotFound(BoardId),
    /// No column exists with the given identifier.
    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// A newly created board together with its default columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBoard {
    /// The stored board.
    pub board: Board,
    /// The default columns, in display order.
    pub columns: Vec<Column>,
}

/// Board and column orchestration service.
#[derive(Clone)]
pub struct BoardService<B, C>
where
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<B>,
    clock: Arc<C>,
}

impl<B, C> BoardService<B, C>
where
    B: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<B>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a board with the default `To Do`, `In Progress`, `Review` and
    /// `Done` columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for an empty title or invalid
    /// color, or repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn create_board(&self, request: CreateBoardRequest) -> BoardServiceResult<CreatedBoard> {
        let title = BoardTitle::new(request.title)?;
        let color = request
            .color
            .map(BoardColor::new)
            .transpose()?
            .unwrap_or_default();
        let board = Board::new(title, color, request.owner_id, &*self.clock);

        let columns = DEFAULT_COLUMN_TITLES
            .iter()
            .zip(0_u32..)
            .map(|(title, position)| {
                ColumnTitle::new(*title).map(|valid| Column::new(board.id(), valid, position))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.repository.store_board(&board, &columns).await?;
        tracing::info!(board_id = %board.id(), "created board with default columns");
        Ok(CreatedBoard { board, columns })
    }

    /// Applies a title and/or color edit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`] for unknown boards,
    /// validation errors, or repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn update_board(
        &self,
        board_id: BoardId,
        request: UpdateBoardRequest,
    ) -> BoardServiceResult<Board> {
        let mut board = self.find_board_or_error(board_id).await?;
        let title = request.title.map(BoardTitle::new).transpose()?;
        let color = request.color.map(BoardColor::new).transpose()?;
        board.edit(title, color, &*self.clock);
        self.repository.update_board(&board).await?;
        Ok(board)
    }

    /// Lists the boards owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_boards(&self, owner_id: &str) -> BoardServiceResult<Vec<Board>> {
        Ok(self.repository.boards_for_owner(owner_id).await?)
    }

    /// Finds a board or fails with [`BoardServiceError::BoardNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`] or repository errors.
    pub async fn find_board_or_error(&self, board_id: BoardId) -> BoardServiceResult<Board> {
        self.repository
            .find_board(board_id)
            .await?
            .ok_or(BoardServiceError::BoardNotFound(board_id))
    }

    /// Lists the columns of a board in display order.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn columns(&self, board_id: BoardId) -> BoardServiceResult<Vec<Column>> {
        Ok(self.repository.columns_for_board(board_id).await?)
    }

    /// Appends a new column at the end of a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`] for unknown boards,
    /// validation errors, or repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn create_column(&self, board_id: BoardId, title: &str) -> BoardServiceResult<Column> {
        let column_title = ColumnTitle::new(title)?;
        self.find_board_or_error(board_id).await?;
        let existing = self.repository.columns_for_board(board_id).await?;
        let position = u32::try_from(existing.len()).unwrap_or(u32::MAX);
        let column = Column::new(board_id, column_title, position);
        self.repository.store_column(&column).await?;
        Ok(column)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ColumnNotFound`] for unknown columns,
    /// validation errors, or repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn rename_column(&self, column_id: ColumnId, title: &str) -> BoardServiceResult<Column> {
        let column_title = ColumnTitle::new(title)?;
        let mut column = self
            .repository
            .find_column(column_id)
            .await?
            .ok_or(BoardServiceError::ColumnNotFound(column_id))?;
        column.rename(column_title);
        self.repository.update_column(&column).await?;
        Ok(column)
    }
}
