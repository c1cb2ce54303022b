//! Runs the taskboard HTTP service against `PostgreSQL`.
//!
//! Configuration is read from `TASKBOARD_*` environment variables; see
//! [`taskboard::config::Config`].

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::board::adapters::postgres::PostgresBoardRepository;
use taskboard::config::Config;
use taskboard::notification::adapters::{graph::GraphCalendarProvider, smtp::SmtpMailer};
use taskboard::persistence::{apply_migrations, build_pool};
use taskboard::task::adapters::postgres::PostgresTaskRepository;
use taskboard::web::{AppDependencies, AppSettings, AppState, PostgresBackend, router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let pool = build_pool(&config.database_url)?;
    let migration_pool = pool.clone();
    let applied = tokio::task::spawn_blocking(move || apply_migrations(&migration_pool)).await??;
    tracing::info!(applied, "database migrations applied");

    let calendar = config
        .calendar
        .as_ref()
        .map(GraphCalendarProvider::from_settings)
        .transpose()?
        .map(Arc::new);
    if calendar.is_none() {
        tracing::warn!("calendar settings absent; calendar events are disabled");
    }

    let deps = AppDependencies::<PostgresBackend> {
        tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        boards: Arc::new(PostgresBoardRepository::new(pool)),
        mailer: Arc::new(SmtpMailer::from_settings(&config.mail)?),
        calendar,
        clock: Arc::new(DefaultClock),
    };
    let settings = AppSettings {
        jwt_secret: config.jwt_secret.clone(),
        cron_secret: config.cron_secret.clone(),
        reminder_lease: config.reminders.lease(),
    };
    let state = AppState::new(deps, settings)?;

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "taskboard listening");
    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
