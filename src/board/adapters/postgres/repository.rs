//! `PostgreSQL` repository implementation for boards and columns.

use super::{
    models::{BoardRow, ColumnRow},
    schema::{board_columns, boards},
};
use crate::board::{
    domain::{
        Board, BoardColor, BoardId, BoardTitle, Column, ColumnId, ColumnTitle, PersistedBoardData,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::persistence::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store_board(&self, board: &Board, columns: &[Column]) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let board_row = board_to_row(board);
        let column_rows = columns
            .iter()
            .map(column_to_row)
            .collect::<BoardRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(boards::table)
                        .values(&board_row)
                        .execute(tx)?;
                    if !column_rows.is_empty() {
                        diesel::insert_into(board_columns::table)
                            .values(&column_rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let row = board_to_row(board);
        self.run_blocking(move |connection| {
            let updated = diesel::update(boards::table.filter(boards::id.eq(row.id)))
                .set((
                    boards::title.eq(&row.title),
                    boards::color.eq(&row.color),
                    boards::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(BoardRepositoryError::BoardNotFound(BoardId::from_uuid(
                    row.id,
                )));
            }
            Ok(())
        })
        .await
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn boards_for_owner(&self, owner_id: &str) -> BoardRepositoryResult<Vec<Board>> {
        let owner = owner_id.to_owned();
        self.run_blocking(move |connection| {
            boards::table
                .filter(boards::owner_id.eq(owner))
                .order(boards::created_at.desc())
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_board)
                .collect()
        })
        .await
    }

    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let board_id = column.board_id();
        let row = column_to_row(column)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        BoardRepositoryError::BoardNotFound(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let column_id = column.id();
        let row = column_to_row(column)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(board_columns::table.filter(board_columns::id.eq(row.id)))
                .set((
                    board_columns::title.eq(&row.title),
                    board_columns::sort_order.eq(row.sort_order),
                ))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(column_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn columns_for_board(&self, board_id: BoardId) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            board_columns::table
                .filter(board_columns::board_id.eq(board_id.into_inner()))
                .order(board_columns::sort_order.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_column)
                .collect()
        })
        .await
    }

    async fn columns_with_titles(&self, titles: &[&str]) -> BoardRepositoryResult<Vec<Column>> {
        let wanted: Vec<String> = titles.iter().map(|title| (*title).to_owned()).collect();
        self.run_blocking(move |connection| {
            board_columns::table
                .filter(board_columns::title.eq_any(wanted))
                .order(board_columns::sort_order.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_column)
                .collect()
        })
        .await
    }
}

fn board_to_row(board: &Board) -> BoardRow {
    BoardRow {
        id: board.id().into_inner(),
        title: board.title().as_str().to_owned(),
        color: board.color().as_str().to_owned(),
        owner_id: board.owner_id().to_owned(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    }
}

fn column_to_row(column: &Column) -> BoardRepositoryResult<ColumnRow> {
    Ok(ColumnRow {
        id: column.id().into_inner(),
        board_id: column.board_id().into_inner(),
        title: column.title().as_str().to_owned(),
        sort_order: i32::try_from(column.sort_order()).map_err(BoardRepositoryError::persistence)?,
    })
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let BoardRow {
        id,
        title,
        color,
        owner_id,
        created_at,
        updated_at,
    } = row;
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(id),
        title: BoardTitle::new(title).map_err(BoardRepositoryError::persistence)?,
        color: BoardColor::new(color).map_err(BoardRepositoryError::persistence)?,
        owner_id,
        created_at,
        updated_at,
    }))
}

fn row_to_column(row: ColumnRow) -> BoardRepositoryResult<Column> {
    let sort_order = u32::try_from(row.sort_order).map_err(BoardRepositoryError::persistence)?;
    let title = ColumnTitle::new(row.title).map_err(BoardRepositoryError::persistence)?;
    Ok(Column::from_persisted(
        ColumnId::from_uuid(row.id),
        BoardId::from_uuid(row.board_id),
        title,
        sort_order,
    ))
}
