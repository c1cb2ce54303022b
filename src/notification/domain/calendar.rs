//! Calendar events created for a task's assignee and creator.

use crate::auth::EmailAddress;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Task details needed to create the pair of calendar events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventRequest {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Day the events are placed on.
    pub due_date: NaiveDate,
    /// Mailbox of the assignee.
    pub assignee: EmailAddress,
    /// Mailbox of the user who assigned the task.
    pub creator: EmailAddress,
}

/// One event to place in a mailbox's calendar, in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event subject.
    pub subject: String,
    /// HTML body.
    pub body_html: String,
    /// Start time.
    pub start: NaiveDateTime,
    /// End time.
    pub end: NaiveDateTime,
    /// Whether the slot is shown as free.
    pub show_as_free: bool,
    /// Whether the provider should remind the attendee.
    pub reminder_on: bool,
}

impl CalendarEvent {
    /// Event for the assignee: 09:00 to 10:00 UTC on the due date.
    #[must_use]
    pub fn for_assignee(request: &CalendarEventRequest) -> Self {
        let body_html = request
            .description
            .clone()
            .unwrap_or_else(|| format!("Task \"{}\" assigned to you.", request.title));
        Self {
            subject: request.title.clone(),
            body_html,
            start: at_hour(request.due_date, 9),
            end: at_hour(request.due_date, 10),
            show_as_free: false,
            reminder_on: true,
        }
    }

    /// Event for the creator: same slot, shown as free, reminder off.
    #[must_use]
    pub fn for_creator(request: &CalendarEventRequest) -> Self {
        let body_html = request.description.clone().unwrap_or_else(|| {
            format!(
                "You assigned task \"{}\" to {}.",
                request.title, request.assignee
            )
        });
        Self {
            subject: format!("Task Assigned: {} (to {})", request.title, request.assignee),
            body_html,
            start: at_hour(request.due_date, 9),
            end: at_hour(request.due_date, 10),
            show_as_free: true,
            reminder_on: false,
        }
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Combined outcome of creating both events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DualEventStatus {
    /// Both events were created.
    AllCreated,
    /// Only the creator's event was created.
    AssigneeFailed(EmailAddress),
    /// Only the assignee's event was created.
    CreatorFailed(EmailAddress),
    /// Neither event was created.
    BothFailed,
}

impl DualEventStatus {
    /// Combines the two per-mailbox results.
    #[must_use]
    pub fn from_results(
        request: &CalendarEventRequest,
        assignee_created: bool,
        creator_created: bool,
    ) -> Self {
        match (assignee_created, creator_created) {
            (true, true) => Self::AllCreated,
            (false, true) => Self::AssigneeFailed(request.assignee.clone()),
            (true, false) => Self::CreatorFailed(request.creator.clone()),
            (false, false) => Self::BothFailed,
        }
    }

    /// Returns whether at least one event exists.
    #[must_use]
    pub const fn any_created(&self) -> bool {
        !matches!(self, Self::BothFailed)
    }
}

impl fmt::Display for DualEventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllCreated => f.write_str("Events created successfully in both calendars"),
            Self::AssigneeFailed(assignee) => write!(
                f,
                "Event created for creator, but failed for assignee: {assignee}"
            ),
            Self::CreatorFailed(creator) => write!(
                f,
                "Event created for assignee, but failed for creator: {creator}"
            ),
            Self::BothFailed => {
                f.write_str("Failed to create events for both assignee and creator.")
            }
        }
    }
}
