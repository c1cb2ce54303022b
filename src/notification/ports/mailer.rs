//! Outbound email port.

use crate::notification::domain::EmailMessage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivers rendered emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] when the message cannot be built or the
    /// transport rejects it.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Errors returned by [`Mailer`] implementations.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    /// The message could not be assembled, for example a bad sender address.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The transport failed to deliver the message.
    #[error("mail transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
