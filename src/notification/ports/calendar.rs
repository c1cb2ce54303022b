//! Calendar provider port.

use crate::auth::EmailAddress;
use crate::notification::domain::CalendarEvent;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Application access token issued by the calendar provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw bearer token.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Creates events in users' calendars with application credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Acquires an application access token.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] when the provider refuses the credentials.
    async fn acquire_token(&self) -> Result<AccessToken, CalendarError>;

    /// Creates `event` in the calendar of `mailbox`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] when the provider rejects the event.
    async fn create_event(
        &self,
        token: &AccessToken,
        mailbox: &EmailAddress,
        event: &CalendarEvent,
    ) -> Result<(), CalendarError>;
}

/// Errors returned by [`CalendarProvider`] implementations.
#[derive(Debug, Clone, Error)]
pub enum CalendarError {
    /// No access token could be acquired.
    #[error("could not acquire access token: {0}")]
    Token(String),

    /// The provider answered with a non-success status.
    #[error("calendar provider returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The request could not be sent or its response decoded.
    #[error("calendar transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl CalendarError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
