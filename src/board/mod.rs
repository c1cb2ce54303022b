//! Boards and their columns.
//!
//! A board is the top-level container of a kanban workspace. Every board is
//! created with the default `To Do`, `In Progress`, `Review` and `Done`
//! columns; further columns can be appended and renamed. Column titles also
//! classify columns into workflow [`domain::Lane`]s, which drive reminder
//! scheduling and move rules in the task lifecycle.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
