//! Application services for board management.

mod board;

pub use board::{
    BoardService, BoardServiceError, BoardServiceResult, CreateBoardRequest, CreatedBoard,
    UpdateBoardRequest,
};
