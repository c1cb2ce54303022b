//! Notification content: rendered emails and calendar events.

mod calendar;
mod email;

pub use calendar::{CalendarEvent, CalendarEventRequest, DualEventStatus};
pub use email::{AssignmentDetails, EmailComposer, EmailMessage};
