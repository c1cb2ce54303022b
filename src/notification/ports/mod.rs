//! Port contracts for outbound notifications.

pub mod calendar;
pub mod mailer;

pub use calendar::{AccessToken, CalendarError, CalendarProvider};
pub use mailer::{Mailer, MailerError};

#[cfg(test)]
pub use calendar::MockCalendarProvider;
#[cfg(test)]
pub use mailer::MockMailer;
