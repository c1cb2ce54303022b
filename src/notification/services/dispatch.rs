//! Notifications fired when a task is created.

use super::{AssignmentNotifier, CalendarEventService};
use crate::auth::Actor;
use crate::notification::{
    domain::{AssignmentDetails, CalendarEventRequest, DualEventStatus},
    ports::{CalendarProvider, Mailer},
};
use crate::task::{
    domain::Task,
    ports::{TaskNotifier, TaskNotifierError},
};
use async_trait::async_trait;
use thiserror::Error;

/// Failures collected while notifying about one task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .0.join("; "))]
pub struct NotificationFailures(pub Vec<String>);

/// Sends the assignment email and creates the calendar events for new
/// tasks.
///
/// The email goes out whenever the task has an assignee. Calendar events
/// additionally need a due date, a calendar provider and a creator with an
/// email address.
pub struct NotificationDispatcher<M, P>
where
    M: Mailer,
    P: CalendarProvider,
{
    assignment: AssignmentNotifier<M>,
    calendar: Option<CalendarEventService<P>>,
}

impl<M, P> NotificationDispatcher<M, P>
where
    M: Mailer,
    P: CalendarProvider,
{
    /// Creates a dispatcher that only sends email.
    #[must_use]
    pub const fn new(assignment: AssignmentNotifier<M>) -> Self {
        Self {
            assignment,
            calendar: None,
        }
    }

    /// Enables calendar event creation.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarEventService<P>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    async fn create_events(&self, task: &Task, creator: Option<&Actor>) -> Option<String> {
        let calendar = self.calendar.as_ref()?;
        let request = calendar_request(task, creator)?;
        match calendar.create_events(&request).await {
            Ok(DualEventStatus::AllCreated) => None,
            Ok(status) => Some(status.to_string()),
            Err(err) => Some(err.to_string()),
        }
    }
}

#[async_trait]
impl<M, P> TaskNotifier for NotificationDispatcher<M, P>
where
    M: Mailer,
    P: CalendarProvider,
{
    async fn task_created(
        &self,
        task: &Task,
        creator: Option<&Actor>,
    ) -> Result<(), TaskNotifierError> {
        let mut failures = Vec::new();
        let email_failure = match AssignmentDetails::from_task(task) {
            Some(details) => self.assignment.send(&details).await.err(),
            None => None,
        };
        if let Some(err) = email_failure {
            failures.push(err.to_string());
        }
        if let Some(message) = self.create_events(task, creator).await {
            failures.push(message);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TaskNotifierError::new(NotificationFailures(failures)))
        }
    }
}

fn calendar_request(task: &Task, creator: Option<&Actor>) -> Option<CalendarEventRequest> {
    Some(CalendarEventRequest {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date()?,
        assignee: task.assignee()?.clone(),
        creator: creator?.email()?.clone(),
    })
}
