//! Dual-party calendar event creation.

use crate::notification::{
    domain::{CalendarEvent, CalendarEventRequest, DualEventStatus},
    ports::{CalendarError, CalendarProvider},
};
use std::sync::Arc;

/// Creates the assignee and creator events for a task.
pub struct CalendarEventService<P>
where
    P: CalendarProvider,
{
    provider: Arc<P>,
}

impl<P> Clone for CalendarEventService<P>
where
    P: CalendarProvider,
{
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> CalendarEventService<P>
where
    P: CalendarProvider,
{
    /// Creates a service over `provider`.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Creates both events. The creator's event is attempted even when the
    /// assignee's fails.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] only when no access token can be acquired;
    /// per-event failures are reported through [`DualEventStatus`].
    #[tracing::instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_events(
        &self,
        request: &CalendarEventRequest,
    ) -> Result<DualEventStatus, CalendarError> {
        let token = self.provider.acquire_token().await?;

        let assignee_result = self
            .provider
            .create_event(&token, &request.assignee, &CalendarEvent::for_assignee(request))
            .await;
        if let Err(err) = &assignee_result {
            tracing::error!(mailbox = %request.assignee, error = %err, "assignee event failed");
        }
        let creator_result = self
            .provider
            .create_event(&token, &request.creator, &CalendarEvent::for_creator(request))
            .await;
        if let Err(err) = &creator_result {
            tracing::error!(mailbox = %request.creator, error = %err, "creator event failed");
        }

        Ok(DualEventStatus::from_results(
            request,
            assignee_result.is_ok(),
            creator_result.is_ok(),
        ))
    }
}
