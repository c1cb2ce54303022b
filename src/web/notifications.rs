//! Reminder trigger, assignment email and calendar event handlers.

use super::{ApiError, AppState, Backend, CurrentActor, JsonBody};
use crate::auth::EmailAddress;
use crate::notification::domain::{AssignmentDetails, CalendarEventRequest, DualEventStatus};
use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Header carrying the shared cron secret.
pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Response of the reminder trigger.
#[derive(Debug, Serialize)]
pub(crate) struct ReminderResponse {
    success: bool,
    message: String,
    sent: usize,
    skipped: usize,
    failed: usize,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub(crate) struct SuccessResponse {
    success: bool,
    message: String,
}

/// Body of `POST /api/send-assignment-email`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignmentEmailBody {
    #[serde(default)]
    email: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
}

/// Body of `POST /api/create-calendar-event`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalendarEventBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    assignee_email: Option<String>,
}

#[tracing::instrument(skip(state, headers))]
pub(crate) async fn send_reminders<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    headers: HeaderMap,
) -> Result<Json<ReminderResponse>, ApiError> {
    if let Some(expected) = &state.cron_secret {
        let provided = headers
            .get(CRON_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            return Err(ApiError::Unauthorized);
        }
    }
    let summary = state.reminders.run().await?;
    Ok(Json(ReminderResponse {
        success: true,
        message: summary.message(),
        sent: summary.sent,
        skipped: summary.skipped,
        failed: summary.failed,
    }))
}

#[tracing::instrument(skip(state, body))]
pub(crate) async fn send_assignment_email<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    JsonBody(body): JsonBody<AssignmentEmailBody>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let recipient = required_email(body.email, "Recipient email is required")?;
    let details = AssignmentDetails {
        recipient,
        title: body.title,
        description: body.description,
        due_date: body.due_date,
    };
    state.assignment.send(&details).await?;
    Ok(Json(SuccessResponse {
        success: true,
        message: "Email sent successfully".to_owned(),
    }))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn create_calendar_event<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    body: Result<JsonBody<CalendarEventBody>, ApiError>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let actor = current.require()?;
    let creator = actor.email().cloned().ok_or(ApiError::Unauthorized)?;
    let JsonBody(body) = body?;
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_owned()));
    }
    let assignee = required_email(body.assignee_email, "Assignee email is required")?;
    let due_date = body
        .due_date
        .ok_or_else(|| ApiError::BadRequest("Due date is required".to_owned()))?;
    let Some(calendar) = &state.calendar else {
        return Err(ApiError::Internal(
            "calendar integration is not configured".to_owned(),
        ));
    };

    let request = CalendarEventRequest {
        title: body.title,
        description: body.description,
        due_date,
        assignee,
        creator,
    };
    let status = calendar.create_events(&request).await?;
    let code = match status {
        DualEventStatus::AllCreated => StatusCode::OK,
        DualEventStatus::AssigneeFailed(_) | DualEventStatus::CreatorFailed(_) => {
            StatusCode::MULTI_STATUS
        }
        DualEventStatus::BothFailed => return Err(ApiError::Internal(status.to_string())),
    };
    Ok((
        code,
        Json(SuccessResponse {
            success: code == StatusCode::OK,
            message: status.to_string(),
        }),
    ))
}

fn required_email(raw: Option<String>, missing: &str) -> Result<EmailAddress, ApiError> {
    let value = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(missing.to_owned()))?;
    EmailAddress::new(value).map_err(|err| ApiError::BadRequest(err.to_string()))
}
