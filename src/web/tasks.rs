//! Task handlers.

use super::{ApiError, AppState, Backend, CurrentActor, JsonBody};
use crate::board::domain::ColumnId;
use crate::task::{
    domain::{Priority, ReminderInterval, Task, TaskHistoryEntry, TaskId},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Body of `POST /api/columns/{id}/tasks`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateTaskBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    reminder: Option<ReminderInterval>,
}

impl CreateTaskBody {
    fn into_request(self) -> CreateTaskRequest {
        let mut request = CreateTaskRequest::new(self.title);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(assignee) = self.assignee {
            request = request.with_assignee(assignee);
        }
        if let Some(due_date) = self.due_date {
            request = request.with_due_date(due_date);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(reminder) = self.reminder {
            request = request.with_reminder(reminder);
        }
        request
    }
}

/// Body of `PATCH /api/tasks/{id}`. An explicit `null` clears a nullable
/// field; an omitted field is left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UpdateTaskBody {
    title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    description: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    assignee: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    due_date: Option<Option<NaiveDate>>,
    priority: Option<Priority>,
    reminder: Option<ReminderInterval>,
    #[serde(deserialize_with = "nullable")]
    next_reminder_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            assignee: body.assignee,
            due_date: body.due_date,
            priority: body.priority,
            reminder: body.reminder,
            next_reminder_at: body.next_reminder_at,
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /api/tasks/{id}/move`.
#[derive(Debug, Deserialize)]
pub(crate) struct MoveBody {
    column_id: ColumnId,
    index: usize,
}

/// Response of `POST /api/tasks/{id}/move`.
#[derive(Debug, Serialize)]
pub(crate) struct MoveResponse {
    moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn create_task<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(column_id): Path<ColumnId>,
    body: Result<JsonBody<CreateTaskBody>, ApiError>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let actor = current.require()?;
    let JsonBody(body) = body?;
    let task = state
        .tasks
        .create(column_id, body.into_request(), Some(actor))
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn update_task<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(task_id): Path<TaskId>,
    body: Result<JsonBody<UpdateTaskBody>, ApiError>,
) -> Result<Json<Task>, ApiError> {
    current.require()?;
    let JsonBody(body) = body?;
    let task = state
        .tasks
        .update(task_id, body.into(), current.actor())
        .await?;
    Ok(Json(task))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn move_task<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(task_id): Path<TaskId>,
    body: Result<JsonBody<MoveBody>, ApiError>,
) -> Result<Json<MoveResponse>, ApiError> {
    let actor = current.require()?;
    let JsonBody(body) = body?;
    let outcome = state
        .tasks
        .move_task(task_id, body.column_id, body.index, Some(actor))
        .await?;
    Ok(Json(MoveResponse {
        moved: outcome.is_moved(),
        task: outcome.task().cloned(),
    }))
}

#[tracing::instrument(skip(state, current))]
pub(crate) async fn task_history<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<Vec<TaskHistoryEntry>>, ApiError> {
    current.require()?;
    Ok(Json(state.tasks.history(task_id).await?))
}
