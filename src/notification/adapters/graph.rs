//! Microsoft Graph style calendar provider over `reqwest`.

use crate::auth::EmailAddress;
use crate::config::CalendarSettings;
use crate::notification::{
    domain::CalendarEvent,
    ports::{AccessToken, CalendarError, CalendarProvider},
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";
const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphEvent<'a> {
    subject: &'a str,
    body: GraphBody<'a>,
    start: GraphTime,
    end: GraphTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_as: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_reminder_on: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphBody<'a> {
    content_type: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphTime {
    date_time: String,
    time_zone: &'static str,
}

impl GraphTime {
    fn utc(value: NaiveDateTime) -> Self {
        Self {
            date_time: value.format(EVENT_TIME_FORMAT).to_string(),
            time_zone: "UTC",
        }
    }
}

impl<'a> GraphEvent<'a> {
    fn from_event(event: &'a CalendarEvent) -> Self {
        Self {
            subject: &event.subject,
            body: GraphBody {
                content_type: "HTML",
                content: &event.body_html,
            },
            start: GraphTime::utc(event.start),
            end: GraphTime::utc(event.end),
            show_as: event.show_as_free.then_some("free"),
            is_reminder_on: (!event.reminder_on).then_some(false),
        }
    }
}

/// Calendar provider using OAuth client credentials and the Graph events
/// API.
#[derive(Debug, Clone)]
pub struct GraphCalendarProvider {
    client: Client,
    token_url: String,
    graph_url: String,
    client_id: String,
    client_secret: String,
}

impl GraphCalendarProvider {
    /// Builds a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn from_settings(settings: &CalendarSettings) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(CalendarError::transport)?;
        Ok(Self {
            client,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                settings.authority_url.trim_end_matches('/'),
                settings.tenant_id
            ),
            graph_url: settings.graph_url.trim_end_matches('/').to_owned(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
        })
    }
}

#[async_trait]
impl CalendarProvider for GraphCalendarProvider {
    async fn acquire_token(&self) -> Result<AccessToken, CalendarError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
            ("grant_type", "client_credentials"),
        ];
        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(CalendarError::transport)?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Token(format!("{status}: {body}")));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| CalendarError::Token(err.to_string()))?;
        Ok(AccessToken::new(token.access_token))
    }

    #[tracing::instrument(skip(self, token, event), fields(mailbox = %mailbox))]
    async fn create_event(
        &self,
        token: &AccessToken,
        mailbox: &EmailAddress,
        event: &CalendarEvent,
    ) -> Result<(), CalendarError> {
        let url = format!("{}/users/{}/events", self.graph_url, mailbox);
        let response = self
            .client
            .post(url)
            .bearer_auth(token.secret())
            .json(&GraphEvent::from_event(event))
            .send()
            .await
            .map_err(CalendarError::transport)?;
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(CalendarError::Rejected { status, body })
    }
}
