//! In-memory mailer and calendar provider for tests and local runs.

use crate::auth::EmailAddress;
use crate::notification::{
    domain::{CalendarEvent, EmailMessage},
    ports::{AccessToken, CalendarError, CalendarProvider, Mailer, MailerError},
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mailer that records messages instead of sending them.
///
/// Recipients registered with [`RecordingMailer::failing_for`] are refused.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    refused: Arc<HashSet<EmailAddress>>,
}

impl RecordingMailer {
    /// Creates a mailer that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that refuses messages to `recipients`.
    #[must_use]
    pub fn failing_for(recipients: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            sent: Arc::default(),
            refused: Arc::new(recipients.into_iter().collect()),
        }
    }

    /// Returns every accepted message in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        if self.refused.contains(&message.to) {
            return Err(MailerError::transport(std::io::Error::other(format!(
                "recipient {} refused",
                message.to
            ))));
        }
        self.sent
            .lock()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?
            .push(message.clone());
        Ok(())
    }
}

/// Calendar provider that records events per mailbox.
#[derive(Debug, Clone, Default)]
pub struct RecordingCalendar {
    events: Arc<Mutex<Vec<(EmailAddress, CalendarEvent)>>>,
    refused: Arc<HashSet<EmailAddress>>,
    token_unavailable: bool,
}

impl RecordingCalendar {
    /// Creates a provider that accepts every event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that rejects events for `mailboxes`.
    #[must_use]
    pub fn failing_for(mailboxes: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            refused: Arc::new(mailboxes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Creates a provider whose token endpoint always fails.
    #[must_use]
    pub fn without_token() -> Self {
        Self {
            token_unavailable: true,
            ..Self::default()
        }
    }

    /// Returns every created event with its mailbox.
    #[must_use]
    pub fn events(&self) -> Vec<(EmailAddress, CalendarEvent)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CalendarProvider for RecordingCalendar {
    async fn acquire_token(&self) -> Result<AccessToken, CalendarError> {
        if self.token_unavailable {
            return Err(CalendarError::Token("credentials rejected".to_owned()));
        }
        Ok(AccessToken::new("in-memory"))
    }

    async fn create_event(
        &self,
        _token: &AccessToken,
        mailbox: &EmailAddress,
        event: &CalendarEvent,
    ) -> Result<(), CalendarError> {
        if self.refused.contains(mailbox) {
            return Err(CalendarError::Rejected {
                status: 404,
                body: format!("mailbox {mailbox} not found"),
            });
        }
        self.events
            .lock()
            .map_err(|err| CalendarError::transport(std::io::Error::other(err.to_string())))?
            .push((mailbox.clone(), event.clone()));
        Ok(())
    }
}
