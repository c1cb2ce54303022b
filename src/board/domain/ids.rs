//! Identifier types for the board domain.

use crate::identifier::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a board.
    BoardId
);

uuid_identifier!(
    /// Unique identifier for a column.
    ColumnId
);
