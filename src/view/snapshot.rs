//! Loaded board state: the board, its columns and their tasks.

use crate::board::{
    domain::{Board, BoardId, Column, ColumnId},
    ports::BoardRepository,
    services::{BoardService, BoardServiceError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;
use serde::Serialize;
use thiserror::Error;

/// Errors returned while loading a board.
#[derive(Debug, Error)]
pub enum BoardLoadError {
    /// Board or column lookup failed.
    #[error(transparent)]
    Board(#[from] BoardServiceError),
    /// Task listing failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
}

/// A column with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTasks {
    /// The column.
    pub column: Column,
    /// Tasks ordered by position.
    pub tasks: Vec<Task>,
}

impl ColumnTasks {
    pub(crate) fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    pub(crate) fn renumber(&mut self) {
        for (position, task) in self.tasks.iter_mut().enumerate() {
            task.set_sort_order(u32::try_from(position).unwrap_or(u32::MAX));
        }
    }
}

/// Board with its columns, each holding its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// The board.
    pub board: Board,
    /// Columns ordered by position.
    pub columns: Vec<ColumnTasks>,
}

impl BoardSnapshot {
    /// Loads a board, its columns by position and each column's tasks by
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLoadError`] when the board is unknown or a store call
    /// fails.
    #[tracing::instrument(skip(boards, tasks))]
    pub async fn load<B, C, R, TB, TC>(
        boards: &BoardService<B, C>,
        tasks: &TaskLifecycleService<R, TB, TC>,
        board_id: BoardId,
    ) -> Result<Self, BoardLoadError>
    where
        B: BoardRepository,
        C: Clock + Send + Sync,
        R: TaskRepository,
        TB: BoardRepository,
        TC: Clock + Send + Sync,
    {
        let board = boards.find_board_or_error(board_id).await?;
        let mut columns = Vec::new();
        for column in boards.columns(board_id).await? {
            let column_tasks = tasks.tasks_in_column(column.id()).await?;
            columns.push(ColumnTasks {
                column,
                tasks: column_tasks,
            });
        }
        Ok(Self { board, columns })
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(|entry| entry.tasks.len()).sum()
    }

    /// Returns the column with `column_id`.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&ColumnTasks> {
        self.columns
            .iter()
            .find(|entry| entry.column.id() == column_id)
    }

    /// Returns the task with `task_id`.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|entry| entry.tasks.iter())
            .find(|task| task.id() == task_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut ColumnTasks> {
        self.columns
            .iter_mut()
            .find(|entry| entry.column.id() == column_id)
    }

    /// Returns the column holding `task_id` and the task's index in it.
    pub(crate) fn locate(&self, task_id: TaskId) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|entry| {
            entry
                .position_of(task_id)
                .map(|index| (entry.column.id(), index))
        })
    }

    pub(crate) fn take_task(&mut self, task_id: TaskId) -> Option<Task> {
        let (column_id, index) = self.locate(task_id)?;
        let entry = self.column_mut(column_id)?;
        let task = entry.tasks.remove(index);
        entry.renumber();
        Some(task)
    }
}
