//! Shared world state for task move BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::auth::{Actor, EmailAddress, Role};
use taskboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ColumnId},
    services::BoardService,
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{MoveOutcome, TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryBoardRepository, DefaultClock>;

/// Scenario world for task move behaviour tests.
pub struct TaskMoveWorld {
    pub boards: BoardService<InMemoryBoardRepository, DefaultClock>,
    pub service: TestTaskService,
    pub actor: Actor,
    pub columns: Vec<Column>,
    pub current_task: Option<Task>,
    pub last_move: Option<Result<MoveOutcome, TaskLifecycleError>>,
}

impl TaskMoveWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let boards = Arc::new(InMemoryBoardRepository::new());
        let clock = Arc::new(DefaultClock);
        let actor = Actor::new(
            "user_admin",
            EmailAddress::new("admin@example.com").ok(),
            Role::Admin,
        );

        Self {
            boards: BoardService::new(Arc::clone(&boards), Arc::clone(&clock)),
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                boards,
                clock,
            ),
            actor,
            columns: Vec::new(),
            current_task: None,
            last_move: None,
        }
    }

    /// Resolves a column of the scenario board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no board was created or the title is unknown.
    pub fn column(&self, title: &str) -> Result<ColumnId, eyre::Report> {
        self.columns
            .iter()
            .find(|column| column.title().as_str() == title)
            .map(Column::id)
            .ok_or_else(|| eyre::eyre!("no column titled {title} in scenario world"))
    }

    /// Returns the task the scenario is acting on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for TaskMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskMoveWorld {
    TaskMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
