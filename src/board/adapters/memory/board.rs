//! In-memory repository for boards and columns.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Board, BoardId, Column, ColumnId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    columns: HashMap<ColumnId, Column>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn sorted_columns<'a>(columns: impl Iterator<Item = &'a Column>) -> Vec<Column> {
    let mut found: Vec<Column> = columns.cloned().collect();
    found.sort_by_key(Column::sort_order);
    found
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn store_board(&self, board: &Board, columns: &[Column]) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }
        state.boards.insert(board.id(), board.clone());
        for column in columns {
            state.columns.insert(column.id(), column.clone());
        }
        Ok(())
    }

    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .boards
            .get_mut(&board.id())
            .ok_or(BoardRepositoryError::BoardNotFound(board.id()))?;
        *stored = board.clone();
        Ok(())
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        Ok(self.read()?.boards.get(&id).cloned())
    }

    async fn boards_for_owner(&self, owner_id: &str) -> BoardRepositoryResult<Vec<Board>> {
        let state = self.read()?;
        let mut boards: Vec<Board> = state
            .boards
            .values()
            .filter(|board| board.owner_id() == owner_id)
            .cloned()
            .collect();
        boards.sort_by_key(|board| std::cmp::Reverse(board.created_at()));
        Ok(boards)
    }

    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.boards.contains_key(&column.board_id()) {
            return Err(BoardRepositoryError::BoardNotFound(column.board_id()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .columns
            .get_mut(&column.id())
            .ok_or(BoardRepositoryError::ColumnNotFound(column.id()))?;
        *stored = column.clone();
        Ok(())
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        Ok(self.read()?.columns.get(&id).cloned())
    }

    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        Ok(sorted_columns(
            state
                .columns
                .values()
                .filter(|column| column.board_id() == board_id),
        ))
    }

    async fn columns_with_titles(&self, titles: &[&str]) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.read()?;
        Ok(sorted_columns(
            state
                .columns
                .values()
                .filter(|column| titles.contains(&column.title().as_str())),
        ))
    }
}
