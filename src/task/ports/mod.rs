//! Port contracts for task persistence and notification.

pub mod notifier;
pub mod repository;

pub use notifier::{TaskNotifier, TaskNotifierError};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
