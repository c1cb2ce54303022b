//! Adapter implementations for notification ports.

pub mod graph;
pub mod memory;
pub mod smtp;
