//! Mapping of service errors onto HTTP responses.

use crate::board::{ports::BoardRepositoryError, services::BoardServiceError};
use crate::notification::{
    ports::CalendarError,
    services::{AssignmentEmailError, ReminderDispatchError},
};
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};
use crate::view::BoardLoadError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no valid bearer token.
    #[error("authentication required")]
    Unauthorized,
    /// The caller may not perform the operation.
    #[error("{0}")]
    Forbidden(String),
    /// The request body failed validation.
    #[error("{0}")]
    BadRequest(String),
    /// A referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The operation conflicts with one already in progress.
    #[error("{0}")]
    Conflict(String),
    /// A store or upstream call failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<BoardRepositoryError> for ApiError {
    fn from(err: BoardRepositoryError) -> Self {
        match err {
            BoardRepositoryError::BoardNotFound(_) | BoardRepositoryError::ColumnNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            BoardRepositoryError::DuplicateBoard(_) => Self::Conflict(err.to_string()),
            BoardRepositoryError::Persistence(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskRepositoryError::DuplicateTask(_) => Self::Conflict(err.to_string()),
            TaskRepositoryError::Persistence(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        match err {
            BoardServiceError::Domain(inner) => Self::BadRequest(inner.to_string()),
            BoardServiceError::Repository(inner) => inner.into(),
            BoardServiceError::BoardNotFound(_) | BoardServiceError::ColumnNotFound(_) => {
                Self::NotFound(err.to_string())
            }
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(inner) => Self::BadRequest(inner.to_string()),
            TaskLifecycleError::Repository(inner) => inner.into(),
            TaskLifecycleError::Board(inner) => inner.into(),
            TaskLifecycleError::Unauthorized => Self::Unauthorized,
            TaskLifecycleError::Forbidden => Self::Forbidden(err.to_string()),
            TaskLifecycleError::TaskNotFound(_) | TaskLifecycleError::ColumnNotFound(_) => {
                Self::NotFound(err.to_string())
            }
        }
    }
}

impl From<BoardLoadError> for ApiError {
    fn from(err: BoardLoadError) -> Self {
        match err {
            BoardLoadError::Board(inner) => inner.into(),
            BoardLoadError::Task(inner) => inner.into(),
        }
    }
}

impl From<ReminderDispatchError> for ApiError {
    fn from(err: ReminderDispatchError) -> Self {
        match err {
            ReminderDispatchError::AlreadyRunning => Self::Conflict(err.to_string()),
            ReminderDispatchError::Board(_) | ReminderDispatchError::Repository(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<AssignmentEmailError> for ApiError {
    fn from(err: AssignmentEmailError) -> Self {
        Self::Internal(format!("failed to send email: {err}"))
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        Self::Internal(err.to_string())
    }
}
