//! Service configuration loaded from `TASKBOARD_*` environment variables.
//!
//! Nested sections use a double underscore, so `TASKBOARD_MAIL__SMTP_HOST`
//! sets [`MailSettings::smtp_host`]. The calendar section is optional; when
//! it is absent calendar events are not created.

use chrono::TimeDelta;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// A source could not be read or a value had the wrong shape.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Shared HS256 secret used to verify bearer tokens.
    pub jwt_secret: String,
    /// Secret expected in the `x-cron-secret` header of the reminder
    /// endpoint. The endpoint is open when unset.
    #[serde(default)]
    pub cron_secret: Option<String>,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailSettings,
    /// Calendar provider settings.
    #[serde(default)]
    pub calendar: Option<CalendarSettings>,
    /// Reminder dispatcher settings.
    #[serde(default)]
    pub reminders: ReminderSettings,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when a required value is missing or
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Self::from_settings(settings)
    }

    /// Deserializes configuration from an already built source stack.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when a required value is missing or
    /// malformed.
    pub fn from_settings(settings: config::Config) -> Result<Self, ConfigLoadError> {
        Ok(settings.try_deserialize()?)
    }
}

const fn default_port() -> u16 {
    8080
}

/// SMTP settings for outbound email.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP submission port.
    pub smtp_port: u16,
    /// SMTP user name; also the sender address.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Display name of the sender.
    pub from_name: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_owned(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_name: "Taskboard".to_owned(),
        }
    }
}

/// Client-credential settings for the calendar provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSettings {
    /// Directory tenant identifier.
    pub tenant_id: String,
    /// Application (client) identifier.
    pub client_id: String,
    /// Application secret.
    pub client_secret: String,
    /// Token authority base URL.
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    /// Calendar API base URL.
    #[serde(default = "default_graph_url")]
    pub graph_url: String,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CalendarSettings {
    /// Returns the outbound request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_authority_url() -> String {
    "https://login.microsoftonline.com".to_owned()
}

fn default_graph_url() -> String {
    "https://graph.microsoft.com/v1.0".to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Reminder dispatcher and local trigger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// How long a claimed reminder is held before another pass may retry it.
    pub lease_secs: u32,
    /// Period of the local trigger binary.
    pub cron_interval_secs: u64,
    /// URL the local trigger calls.
    pub cron_target_url: String,
    /// Request timeout of the local trigger in seconds.
    pub cron_timeout_secs: u64,
}

impl ReminderSettings {
    /// Returns the claim lease.
    #[must_use]
    pub fn lease(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.lease_secs))
    }

    /// Returns the local trigger period.
    #[must_use]
    pub const fn cron_interval(&self) -> Duration {
        Duration::from_secs(self.cron_interval_secs)
    }

    /// Returns the local trigger's request timeout.
    #[must_use]
    pub const fn cron_timeout(&self) -> Duration {
        Duration::from_secs(self.cron_timeout_secs)
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            lease_secs: 300,
            cron_interval_secs: 60,
            cron_target_url: "http://localhost:8080/api/cron/send-reminders".to_owned(),
            cron_timeout_secs: 30,
        }
    }
}
