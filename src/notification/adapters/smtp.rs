//! SMTP mailer backed by `lettre`.

use crate::config::MailSettings;
use crate::notification::{
    domain::EmailMessage,
    ports::{Mailer, MailerError},
};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends email through an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds a mailer for the configured relay.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::InvalidMessage`] for a malformed sender address
    /// and [`MailerError::Transport`] when the relay cannot be configured.
    pub fn from_settings(settings: &MailSettings) -> Result<Self, MailerError> {
        let address: Address = settings
            .username
            .parse()
            .map_err(|err| MailerError::InvalidMessage(format!("sender address: {err}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(MailerError::transport)?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            from: Mailbox::new(Some(settings.from_name.clone()), address),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[tracing::instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let recipient: Address = message
            .to
            .as_str()
            .parse()
            .map_err(|err| MailerError::InvalidMessage(format!("recipient address: {err}")))?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, recipient))
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|err| MailerError::InvalidMessage(err.to_string()))?;
        self.transport
            .send(email)
            .await
            .map_err(MailerError::transport)?;
        Ok(())
    }
}
