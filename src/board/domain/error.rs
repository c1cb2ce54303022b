//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board and column values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board title is empty after trimming.
    #[error("board title must not be empty")]
    EmptyBoardTitle,

    /// The board color token is empty or contains whitespace.
    #[error("invalid board color '{0}'")]
    InvalidColor(String),

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,
}
