//! Tactic resource routes.
//!
//! Request and response bodies use the camelCase field names the web client
//! sends; ids travel as UUIDs in the path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{ApiError, success};
use crate::services::tactic::{self, TacticRow};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub board_type: String,
    pub board_data: serde_json::Value,
    pub is_public: bool,
    pub is_archived: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn to_response(row: TacticRow) -> TacticResponse {
    TacticResponse {
        id: row.id,
        title: row.title,
        description: row.description,
        board_type: row.board_type,
        board_data: row.board_data,
        is_public: row.is_public,
        is_archived: row.is_archived,
        user_id: row.user_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTacticBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub board_type: Option<String>,
    pub board_data: Option<serde_json::Value>,
    pub user_id: Option<Uuid>,
}

/// Snapshot stored when the client creates a tactic without board data.
fn default_board_data() -> serde_json::Value {
    board::snapshot::encode(&board::model::BoardState::default())
}

/// `POST /api/board` — create a tactic.
pub async fn create_tactic(
    State(state): State<AppState>,
    Json(body): Json<CreateTacticBody>,
) -> Result<Response, ApiError> {
    let Some(user_id) = body.user_id else {
        return Err(ApiError::bad_request("User ID is required"));
    };
    let (Some(title), Some(board_type)) = (
        body.title.as_deref().filter(|v| !v.is_empty()),
        body.board_type.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Title and Board Type are required"));
    };

    let board_data = body.board_data.unwrap_or_else(default_board_data);
    let row = tactic::create_tactic(
        &state.pool,
        tactic::NewTactic {
            title,
            board_type,
            description: body.description.as_deref().unwrap_or(""),
            board_data: &board_data,
            user_id,
        },
    )
    .await
    .map_err(tactic_error)?;

    Ok(success(StatusCode::CREATED, &to_response(row), "Tactic created successfully"))
}

/// `GET /api/board/:id` — fetch one tactic.
pub async fn get_tactic(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, ApiError> {
    let row = tactic::fetch_tactic(&state.pool, id).await.map_err(tactic_error)?;
    Ok(success(StatusCode::OK, &to_response(row), "Board retrieved successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBoardDataBody {
    pub board_data: serde_json::Value,
}

/// `PATCH /api/board/:id` — replace the persisted snapshot wholesale.
pub async fn save_board_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SaveBoardDataBody>,
) -> Result<Response, ApiError> {
    let row = tactic::replace_board_data(&state.pool, id, &body.board_data)
        .await
        .map_err(tactic_error)?;
    Ok(success(StatusCode::OK, &to_response(row), "Save formation successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTitleBody {
    pub new_title: String,
}

/// `PATCH /api/board/:id/change-title` — partial title update.
pub async fn change_title(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeTitleBody>,
) -> Result<Response, ApiError> {
    let row = tactic::rename_tactic(&state.pool, id, &body.new_title)
        .await
        .map_err(tactic_error)?;
    Ok(success(StatusCode::OK, &to_response(row), "Change title successfully"))
}

/// `DELETE /api/board/:id` — delete a tactic, echoing the removed row.
pub async fn delete_tactic(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response, ApiError> {
    let row = tactic::delete_tactic(&state.pool, id).await.map_err(tactic_error)?;
    Ok(success(StatusCode::OK, &to_response(row), "Delete tactic successfully"))
}

/// `GET /api/users/:user_id/tactics` — list a user's tactics, newest first.
pub async fn list_user_tactics(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let rows = tactic::list_tactics(&state.pool, user_id).await.map_err(tactic_error)?;
    let tactics: Vec<TacticResponse> = rows.into_iter().map(to_response).collect();
    Ok(success(StatusCode::OK, &tactics, "Tactics retrieved successfully"))
}

fn tactic_error(err: tactic::TacticError) -> ApiError {
    match err {
        tactic::TacticError::NotFound(_) => ApiError::not_found("Board not found"),
        tactic::TacticError::Database(e) => {
            tracing::error!(error = %e, "tactic query failed");
            ApiError::internal(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "boards_test.rs"]
mod tests;
