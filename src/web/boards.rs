//! Board and column handlers.

use super::{ApiError, AppState, Backend, CurrentActor, JsonBody};
use crate::board::{
    domain::{Board, BoardId, Column, ColumnId},
    services::{CreateBoardRequest, UpdateBoardRequest},
};
use crate::view::{BoardSnapshot, ColumnTasks};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/boards`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateBoardBody {
    title: String,
    #[serde(default)]
    color: Option<String>,
}

/// Body of `PATCH /api/boards/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UpdateBoardBody {
    title: Option<String>,
    color: Option<String>,
}

/// Body of the column endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ColumnBody {
    title: String,
}

#[tracing::instrument(skip(state, current))]
pub(crate) async fn list_boards<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
) -> Result<Json<Vec<Board>>, ApiError> {
    let actor = current.require()?;
    Ok(Json(state.boards.list_boards(actor.user_id()).await?))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn create_board<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    body: Result<JsonBody<CreateBoardBody>, ApiError>,
) -> Result<(StatusCode, Json<BoardSnapshot>), ApiError> {
    let actor = current.require()?;
    let JsonBody(body) = body?;
    let mut request = CreateBoardRequest::new(actor.user_id(), body.title);
    if let Some(color) = body.color {
        request = request.with_color(color);
    }
    let created = state.boards.create_board(request).await?;
    let snapshot = BoardSnapshot {
        board: created.board,
        columns: created
            .columns
            .into_iter()
            .map(|column| ColumnTasks {
                column,
                tasks: Vec::new(),
            })
            .collect(),
    };
    Ok((StatusCode::CREATED, Json(snapshot)))
}

#[tracing::instrument(skip(state, current))]
pub(crate) async fn load_board<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(board_id): Path<BoardId>,
) -> Result<Json<BoardSnapshot>, ApiError> {
    current.require()?;
    Ok(Json(
        BoardSnapshot::load(&state.boards, &state.tasks, board_id).await?,
    ))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn update_board<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(board_id): Path<BoardId>,
    body: Result<JsonBody<UpdateBoardBody>, ApiError>,
) -> Result<Json<Board>, ApiError> {
    current.require()?;
    let JsonBody(body) = body?;
    let request = UpdateBoardRequest {
        title: body.title,
        color: body.color,
    };
    Ok(Json(state.boards.update_board(board_id, request).await?))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn create_column<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(board_id): Path<BoardId>,
    body: Result<JsonBody<ColumnBody>, ApiError>,
) -> Result<(StatusCode, Json<Column>), ApiError> {
    current.require()?;
    let JsonBody(body) = body?;
    let column = state.boards.create_column(board_id, &body.title).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

#[tracing::instrument(skip(state, current, body))]
pub(crate) async fn rename_column<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    Extension(current): Extension<CurrentActor>,
    Path(column_id): Path<ColumnId>,
    body: Result<JsonBody<ColumnBody>, ApiError>,
) -> Result<Json<Column>, ApiError> {
    current.require()?;
    let JsonBody(body) = body?;
    Ok(Json(state.boards.rename_column(column_id, &body.title).await?))
}
