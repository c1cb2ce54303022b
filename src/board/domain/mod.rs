//! Domain model for boards and their columns.

mod board;
mod column;
mod error;
mod ids;
mod lane;

pub use board::{Board, BoardColor, BoardTitle, PersistedBoardData};
pub use column::{Column, ColumnTitle};
pub use error::BoardDomainError;
pub use ids::{BoardId, ColumnId};
pub use lane::{
    ACTIVE_COLUMN_TITLES, DEFAULT_COLUMN_TITLES, DONE, IN_PROGRESS, Lane, REVIEW, TO_DO,
};
