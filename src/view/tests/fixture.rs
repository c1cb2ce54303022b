//! Board with tasks shared by the view tests.

use std::sync::Arc;

use crate::auth::{Actor, EmailAddress, Role};
use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardId, Column, ColumnId},
    services::{BoardService, CreateBoardRequest},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use crate::test_support::FixedClock;
use crate::view::{BoardSnapshot, BoardView};

pub type Lifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryBoardRepository, FixedClock>;

pub struct ViewFixture {
    pub boards: BoardService<InMemoryBoardRepository, FixedClock>,
    pub lifecycle: Lifecycle,
    pub board_id: BoardId,
    pub columns: Vec<Column>,
}

impl ViewFixture {
    /// Board with `a`, `b`, `c` in To Do and `x`, `y` in In Progress.
    pub async fn new() -> Self {
        let clock = Arc::new(FixedClock::default());
        let board_repo = Arc::new(InMemoryBoardRepository::new());
        let boards = BoardService::new(Arc::clone(&board_repo), Arc::clone(&clock));
        let created = boards
            .create_board(CreateBoardRequest::new("owner_1", "Sprint"))
            .await
            .expect("board creation should succeed");
        let lifecycle = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            board_repo,
            clock,
        );
        let fixture = Self {
            boards,
            lifecycle,
            board_id: created.board.id(),
            columns: created.columns,
        };
        for title in ["a", "b", "c"] {
            fixture.add("To Do", title).await;
        }
        for title in ["x", "y"] {
            fixture.add("In Progress", title).await;
        }
        fixture
    }

    pub fn column(&self, title: &str) -> ColumnId {
        self.columns
            .iter()
            .find(|column| column.title().as_str() == title)
            .map(Column::id)
            .expect("default column should exist")
    }

    pub async fn add(&self, column: &str, title: &str) -> Task {
        self.lifecycle
            .create(self.column(column), CreateTaskRequest::new(title), Some(&admin()))
            .await
            .expect("task creation should succeed")
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::load(&self.boards, &self.lifecycle, self.board_id)
            .await
            .expect("board should load")
    }

    pub async fn view(&self) -> BoardView {
        BoardView::new(self.snapshot().await)
    }
}

pub fn admin() -> Actor {
    Actor::new(
        "user_admin",
        Some(EmailAddress::new("admin@example.com").expect("valid email")),
        Role::Admin,
    )
}

pub fn titles(snapshot: &BoardSnapshot, column: ColumnId) -> Vec<String> {
    snapshot
        .column(column)
        .map(|entry| {
            entry
                .tasks
                .iter()
                .map(|task| task.title().as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

pub fn task_id(snapshot: &BoardSnapshot, title: &str) -> TaskId {
    snapshot
        .columns
        .iter()
        .flat_map(|entry| entry.tasks.iter())
        .find(|task| task.title().as_str() == title)
        .map(Task::id)
        .expect("task should exist")
}
