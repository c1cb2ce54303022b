//! Diesel schema for board persistence.

diesel::table! {
    /// Board records.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board title.
        #[max_length = 255]
        title -> Varchar,
        /// CSS color token.
        #[max_length = 64]
        color -> Varchar,
        /// Identity-provider id of the owner.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Column records.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Column title.
        #[max_length = 255]
        title -> Varchar,
        /// Display position within the board.
        sort_order -> Int4,
    }
}

diesel::joinable!(board_columns -> boards (board_id));
diesel::allow_tables_to_appear_in_same_query!(boards, board_columns);
