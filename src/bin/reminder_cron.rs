//! Periodically triggers the reminder endpoint of a running service.
//!
//! Stands in for a hosted scheduler during local runs. The period, target URL
//! and shared secret come from the same `TASKBOARD_*` variables the service
//! reads.

use reqwest::Client;
use serde_json::Value;
use taskboard::config::Config;
use taskboard::web::CRON_SECRET_HEADER;
use tokio::time::{MissedTickBehavior, interval};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let client = Client::builder()
        .timeout(config.reminders.cron_timeout())
        .build()?;
    let mut ticker = interval(config.reminders.cron_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::info!(
        target_url = %config.reminders.cron_target_url,
        period_secs = config.reminders.cron_interval_secs,
        "reminder trigger started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = trigger(&client, &config).await {
                    tracing::warn!(error = %err, "reminder trigger failed");
                }
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("reminder trigger stopped");
                return Ok(());
            }
        }
    }
}

async fn trigger(client: &Client, config: &Config) -> Result<(), reqwest::Error> {
    let mut request = client.get(&config.reminders.cron_target_url);
    if let Some(secret) = &config.cron_secret {
        request = request.header(CRON_SECRET_HEADER, secret);
    }
    let response = request.send().await?.error_for_status()?;
    let body: Value = response.json().await?;
    let sent = body.get("sent").and_then(Value::as_u64).unwrap_or_default();
    let failed = body.get("failed").and_then(Value::as_u64).unwrap_or_default();
    tracing::info!(sent, failed, "reminder pass complete");
    Ok(())
}
