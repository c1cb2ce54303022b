//! Shared service fixture for task lifecycle tests.

use std::sync::Arc;

use crate::auth::{Actor, EmailAddress, Role};
use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ColumnId},
    services::{BoardService, CreateBoardRequest},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ReminderInterval, Task},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use crate::test_support::FixedClock;

pub type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryBoardRepository, FixedClock>;

pub struct Harness {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub boards: Arc<InMemoryBoardRepository>,
    pub clock: FixedClock,
    pub columns: Vec<Column>,
}

impl Harness {
    pub async fn new() -> Self {
        let clock = FixedClock::default();
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let boards = Arc::new(InMemoryBoardRepository::new());
        let created = BoardService::new(Arc::clone(&boards), Arc::new(clock.clone()))
            .create_board(CreateBoardRequest::new("owner_1", "Sprint"))
            .await
            .expect("board creation should succeed");
        let service = TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&boards),
            Arc::new(clock.clone()),
        );
        Self {
            service,
            tasks,
            boards,
            clock,
            columns: created.columns,
        }
    }

    pub fn column(&self, title: &str) -> ColumnId {
        self.columns
            .iter()
            .find(|column| column.title().as_str() == title)
            .map(Column::id)
            .expect("default column should exist")
    }

    pub async fn add(&self, column: &str, title: &str, reminder: ReminderInterval) -> Task {
        self.service
            .create(
                self.column(column),
                CreateTaskRequest::new(title).with_reminder(reminder),
                Some(&admin()),
            )
            .await
            .expect("task creation should succeed")
    }

    pub async fn titles_in(&self, column: &str) -> Vec<String> {
        self.service
            .tasks_in_column(self.column(column))
            .await
            .expect("listing should succeed")
            .iter()
            .map(|task| task.title().as_str().to_owned())
            .collect()
    }
}

pub fn admin() -> Actor {
    Actor::new(
        "user_admin",
        Some(EmailAddress::new("admin@example.com").expect("valid email")),
        Role::Admin,
    )
}

pub fn member() -> Actor {
    Actor::new("user_member", None, Role::Member)
}
