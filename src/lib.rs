//! Taskboard: Kanban boards with task lifecycle tracking and notifications.
//!
//! This crate provides boards with ordered columns, tasks that move between
//! them under lane rules, change history, assignment emails, calendar events
//! and a periodic reminder dispatcher, all behind a JSON HTTP surface.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, SMTP, etc.)
//!
//! # Modules
//!
//! - [`auth`]: Bearer token verification and caller roles
//! - [`board`]: Boards and their ordered columns
//! - [`task`]: Task lifecycle, lane rules and change history
//! - [`notification`]: Assignment emails, calendar events and reminders
//! - [`view`]: Client-side board state with optimistic moves
//! - [`web`]: HTTP routes over the services

pub mod auth;
pub mod board;
pub mod config;
mod identifier;
pub mod notification;
pub mod persistence;
pub mod task;
#[cfg(test)]
mod test_support;
pub mod view;
pub mod web;
