//! Kanban tasks and their lifecycle.
//!
//! Tasks are created at the end of a column, edited by admins, and moved
//! between columns by drag and drop. Moving a task between lanes restarts or
//! stops its reminder schedule, and every change is written to an
//! append-only history. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
