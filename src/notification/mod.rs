//! Email and calendar notifications for tasks.
//!
//! New tasks trigger an assignment email and, when a due date is set, a
//! pair of calendar events for the assignee and the creator. A recurring
//! dispatcher sends reminder emails for tasks in the active lanes. The
//! module follows the same layout as the task module:
//!
//! - Rendered emails and calendar events in [`domain`]
//! - Mailer and calendar provider contracts in [`ports`]
//! - SMTP, Microsoft Graph and in-memory adapters in [`adapters`]
//! - Dispatch services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
