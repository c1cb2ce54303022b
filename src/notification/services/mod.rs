//! Notification services.

mod assignment;
mod calendar;
mod dispatch;
mod reminders;

pub use assignment::{AssignmentEmailError, AssignmentNotifier};
pub use calendar::CalendarEventService;
pub use dispatch::{NotificationDispatcher, NotificationFailures};
pub use reminders::{DEFAULT_LEASE, ReminderDispatchError, ReminderDispatcher, ReminderSummary};
