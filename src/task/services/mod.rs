//! Application services for task lifecycle management.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, MoveOutcome, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, UpdateTaskRequest,
};
