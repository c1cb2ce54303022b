//! `PostgreSQL` adapters for task ports.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
