//! Port contracts for board management.

pub mod repository;

pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
