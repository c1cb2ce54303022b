//! Shared `PostgreSQL` plumbing: connection pool and schema migrations.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the Diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Ordered schema migrations as `(name, up.sql)` pairs.
pub const MIGRATIONS: [(&str, &str); 1] = [(
    "2026-10-01-000000_create_board_tables",
    include_str!("../migrations/2026-10-01-000000_create_board_tables/up.sql"),
)];

const MIGRATION_LEDGER_SQL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS taskboard_migrations (",
    "name VARCHAR(255) PRIMARY KEY, ",
    "applied_at TIMESTAMPTZ NOT NULL DEFAULT now())",
);

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceSetupError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// A migration statement failed.
    #[error("migration {name} failed: {source}")]
    Migration {
        /// Migration name.
        name: String,
        /// Underlying database error.
        #[source]
        source: diesel::result::Error,
    },
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceSetupError::Pool`] when the initial connections
/// cannot be established.
pub fn build_pool(database_url: &str) -> Result<PgPool, PersistenceSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().build(manager)?)
}

/// Applies every migration not yet recorded in the migration ledger.
///
/// This is blocking; call it from `spawn_blocking` or before the runtime
/// starts serving requests.
///
/// # Errors
///
/// Returns [`PersistenceSetupError`] when a connection cannot be obtained or
/// a migration fails.
pub fn apply_migrations(pool: &PgPool) -> Result<usize, PersistenceSetupError> {
    use diesel::prelude::*;

    let mut connection = pool.get()?;
    connection
        .batch_execute(MIGRATION_LEDGER_SQL)
        .map_err(|source| PersistenceSetupError::Migration {
            name: "taskboard_migrations".to_owned(),
            source,
        })?;

    let mut applied = 0;
    for (name, up_sql) in MIGRATIONS {
        let already_applied: i64 =
            diesel::sql_query("SELECT COUNT(*) AS count FROM taskboard_migrations WHERE name = $1")
                .bind::<diesel::sql_types::Text, _>(name)
                .get_result::<LedgerCount>(&mut connection)
                .map(|row| row.count)
                .map_err(|source| PersistenceSetupError::Migration {
                    name: name.to_owned(),
                    source,
                })?;
        if already_applied > 0 {
            continue;
        }

        connection
            .transaction::<_, diesel::result::Error, _>(|tx| {
                tx.batch_execute(up_sql)?;
                diesel::sql_query("INSERT INTO taskboard_migrations (name) VALUES ($1)")
                    .bind::<diesel::sql_types::Text, _>(name)
                    .execute(tx)?;
                Ok(())
            })
            .map_err(|source| PersistenceSetupError::Migration {
                name: name.to_owned(),
                source,
            })?;
        tracing::info!(migration = name, "applied schema migration");
        applied += 1;
    }
    Ok(applied)
}

#[derive(diesel::QueryableByName)]
struct LedgerCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}
