//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::auth::{Actor, EmailAddress, Role};
use taskboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ColumnId},
    services::{BoardService, CreateBoardRequest, CreatedBoard},
};
use taskboard::notification::{
    adapters::memory::RecordingMailer, domain::EmailComposer, services::ReminderDispatcher,
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Board service over the in-memory store.
pub type Boards = BoardService<InMemoryBoardRepository, DefaultClock>;
/// Task service over the in-memory stores.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, InMemoryBoardRepository, DefaultClock>;
/// Reminder dispatcher over the in-memory stores.
pub type Reminders =
    ReminderDispatcher<InMemoryTaskRepository, InMemoryBoardRepository, RecordingMailer, DefaultClock>;

/// Services sharing one set of in-memory stores.
pub struct Workspace {
    pub boards: Boards,
    pub tasks: Tasks,
    pub reminders: Reminders,
    pub mailer: RecordingMailer,
}

impl Workspace {
    /// Creates a board titled `title` owned by the admin actor.
    ///
    /// # Errors
    ///
    /// Returns the board service error.
    pub async fn board(&self, title: &str) -> Result<CreatedBoard, eyre::Report> {
        Ok(self
            .boards
            .create_board(CreateBoardRequest::new(admin().user_id(), title))
            .await?)
    }

    /// Creates a task as the admin actor.
    ///
    /// # Errors
    ///
    /// Returns the task service error.
    pub async fn task(
        &self,
        column_id: ColumnId,
        request: CreateTaskRequest,
    ) -> Result<Task, eyre::Report> {
        Ok(self.tasks.create(column_id, request, Some(&admin())).await?)
    }
}

/// Provides services over fresh in-memory stores.
///
/// # Errors
///
/// Returns an error if the email templates fail to compile.
#[fixture]
pub fn workspace() -> Result<Workspace, eyre::Report> {
    let task_store = Arc::new(InMemoryTaskRepository::new());
    let board_store = Arc::new(InMemoryBoardRepository::new());
    let clock = Arc::new(DefaultClock);
    let mailer = RecordingMailer::new();

    Ok(Workspace {
        boards: BoardService::new(Arc::clone(&board_store), Arc::clone(&clock)),
        tasks: TaskLifecycleService::new(
            Arc::clone(&task_store),
            Arc::clone(&board_store),
            Arc::clone(&clock),
        ),
        reminders: ReminderDispatcher::new(
            task_store,
            board_store,
            Arc::new(mailer.clone()),
            Arc::new(EmailComposer::new()?),
            clock,
        ),
        mailer,
    })
}

/// Returns the admin caller used by the helpers.
#[must_use]
pub fn admin() -> Actor {
    Actor::new(
        "user_admin",
        EmailAddress::new("admin@example.com").ok(),
        Role::Admin,
    )
}

/// Finds a column of `board` by title.
///
/// # Errors
///
/// Returns an error when the board has no such column.
pub fn column(board: &CreatedBoard, title: &str) -> Result<ColumnId, eyre::Report> {
    board
        .columns
        .iter()
        .find(|candidate| candidate.title().as_str() == title)
        .map(Column::id)
        .ok_or_else(|| eyre::eyre!("board has no column titled {title}"))
}
