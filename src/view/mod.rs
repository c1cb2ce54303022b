//! UI-independent board view state.
//!
//! A [`BoardView`] holds one loaded [`BoardSnapshot`] and mediates drag and
//! drop. Moves are applied optimistically and either confirmed with the
//! stored task or rolled back to the previous order.

mod controller;
mod filter;
mod snapshot;

pub use controller::{BoardView, DropTarget, MoveRequest, PendingMove};
pub use filter::TaskFilter;
pub use snapshot::{BoardLoadError, BoardSnapshot, ColumnTasks};

#[cfg(test)]
mod tests;
