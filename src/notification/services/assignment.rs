//! One-shot assignment email.

use crate::notification::{
    domain::{AssignmentDetails, EmailComposer},
    ports::{Mailer, MailerError},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while sending an assignment email.
#[derive(Debug, Error)]
pub enum AssignmentEmailError {
    /// The email could not be rendered.
    #[error("could not render assignment email: {0}")]
    Compose(#[from] minijinja::Error),
    /// The mailer failed.
    #[error(transparent)]
    Mailer(#[from] MailerError),
}

/// Sends the email telling an assignee about a new task.
pub struct AssignmentNotifier<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    composer: Arc<EmailComposer>,
}

impl<M> Clone for AssignmentNotifier<M>
where
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            composer: Arc::clone(&self.composer),
        }
    }
}

impl<M> AssignmentNotifier<M>
where
    M: Mailer,
{
    /// Creates a notifier.
    #[must_use]
    pub const fn new(mailer: Arc<M>, composer: Arc<EmailComposer>) -> Self {
        Self { mailer, composer }
    }

    /// Renders and sends the assignment email.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentEmailError`] when rendering or delivery fails.
    #[tracing::instrument(skip(self, details), fields(to = %details.recipient))]
    pub async fn send(&self, details: &AssignmentDetails) -> Result<(), AssignmentEmailError> {
        let message = self.composer.assignment(details)?;
        self.mailer.send(&message).await?;
        tracing::info!("sent assignment email");
        Ok(())
    }
}
