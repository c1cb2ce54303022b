//! HTTP surface built on axum.
//!
//! Every route lives under `/api` except the `/health` probe. Callers are
//! identified from an optional `Authorization: Bearer` header; handlers that
//! need an actor reject anonymous requests with 401.

mod auth;
mod backend;
mod boards;
mod error;
mod extract;
mod notifications;
mod tasks;

pub use auth::CurrentActor;
pub use backend::{Backend, InMemoryBackend, PostgresBackend};
pub use error::{ApiError, ErrorBody};
pub use extract::JsonBody;
pub use notifications::CRON_SECRET_HEADER;

use crate::auth::TokenVerifier;
use crate::board::services::BoardService;
use crate::notification::{
    domain::EmailComposer,
    services::{
        AssignmentNotifier, CalendarEventService, NotificationDispatcher, ReminderDispatcher,
    },
};
use crate::task::services::TaskLifecycleService;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use chrono::TimeDelta;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Adapters an [`AppState`] is assembled from.
pub struct AppDependencies<K: Backend> {
    /// Task store.
    pub tasks: Arc<K::Tasks>,
    /// Board and column store.
    pub boards: Arc<K::Boards>,
    /// Outbound mail transport.
    pub mailer: Arc<K::Mailer>,
    /// Calendar provider; calendar events are skipped when absent.
    pub calendar: Option<Arc<K::Calendar>>,
    /// Time source.
    pub clock: Arc<K::Clock>,
}

/// Settings an [`AppState`] is assembled with.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Shared HS256 secret for bearer tokens.
    pub jwt_secret: String,
    /// Secret required in the `x-cron-secret` header, when set.
    pub cron_secret: Option<String>,
    /// Claim lease of the reminder dispatcher.
    pub reminder_lease: TimeDelta,
}

/// Services shared by every request.
pub struct AppState<K: Backend> {
    pub(crate) boards: BoardService<K::Boards, K::Clock>,
    pub(crate) tasks: TaskLifecycleService<K::Tasks, K::Boards, K::Clock>,
    pub(crate) reminders: ReminderDispatcher<K::Tasks, K::Boards, K::Mailer, K::Clock>,
    pub(crate) assignment: AssignmentNotifier<K::Mailer>,
    pub(crate) calendar: Option<CalendarEventService<K::Calendar>>,
    pub(crate) verifier: TokenVerifier,
    pub(crate) cron_secret: Option<String>,
}

impl<K: Backend> AppState<K> {
    /// Wires the services together. New tasks trigger the assignment email
    /// and, when a calendar provider is configured, calendar events.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the email templates fail to compile.
    pub fn new(deps: AppDependencies<K>, settings: AppSettings) -> Result<Self, minijinja::Error> {
        let composer = Arc::new(EmailComposer::new()?);
        let assignment = AssignmentNotifier::new(Arc::clone(&deps.mailer), Arc::clone(&composer));
        let calendar = deps.calendar.map(CalendarEventService::new);

        let mut dispatcher = NotificationDispatcher::new(assignment.clone());
        if let Some(events) = &calendar {
            dispatcher = dispatcher.with_calendar(events.clone());
        }
        let tasks = TaskLifecycleService::new(
            Arc::clone(&deps.tasks),
            Arc::clone(&deps.boards),
            Arc::clone(&deps.clock),
        )
        .with_notifier(Arc::new(dispatcher));
        let reminders = ReminderDispatcher::new(
            deps.tasks,
            Arc::clone(&deps.boards),
            deps.mailer,
            composer,
            Arc::clone(&deps.clock),
        )
        .with_lease(settings.reminder_lease);

        Ok(Self {
            boards: BoardService::new(deps.boards, deps.clock),
            tasks,
            reminders,
            assignment,
            calendar,
            verifier: TokenVerifier::new(&settings.jwt_secret),
            cron_secret: settings.cron_secret,
        })
    }
}

/// Builds the application router.
#[must_use]
pub fn router<K: Backend>(state: Arc<AppState<K>>) -> Router {
    let api = Router::new()
        .route(
            "/api/boards",
            get(boards::list_boards::<K>).post(boards::create_board::<K>),
        )
        .route(
            "/api/boards/{id}",
            get(boards::load_board::<K>).patch(boards::update_board::<K>),
        )
        .route("/api/boards/{id}/columns", post(boards::create_column::<K>))
        .route("/api/columns/{id}", patch(boards::rename_column::<K>))
        .route("/api/columns/{id}/tasks", post(tasks::create_task::<K>))
        .route("/api/tasks/{id}", patch(tasks::update_task::<K>))
        .route("/api/tasks/{id}/move", post(tasks::move_task::<K>))
        .route("/api/tasks/{id}/history", get(tasks::task_history::<K>))
        .route(
            "/api/cron/send-reminders",
            get(notifications::send_reminders::<K>),
        )
        .route(
            "/api/send-assignment-email",
            post(notifications::send_assignment_email::<K>),
        )
        .route(
            "/api/create-calendar-event",
            post(notifications::create_calendar_event::<K>),
        )
        .layer(from_fn_with_state(Arc::clone(&state), auth::authenticate::<K>))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument]
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
