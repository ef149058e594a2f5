//! Account registration route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{ApiError, success};
use crate::services::account::{self, UserRow};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

fn to_response(row: UserRow) -> UserResponse {
    UserResponse {
        id: row.id,
        username: row.username,
        email: row.email,
        created_at: row.created_at,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// `POST /api/register` — create an account.
///
/// The response never carries the password digest.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Response, ApiError> {
    let row = account::register_user(
        &state.pool,
        account::NewUser {
            username: &body.username,
            email: &body.email,
            password: &body.password,
            confirm_password: &body.confirm_password,
        },
    )
    .await
    .map_err(register_error)?;

    Ok(success(StatusCode::CREATED, &to_response(row), "User created successfully"))
}

fn register_error(err: account::RegisterError) -> ApiError {
    match err {
        account::RegisterError::PasswordMismatch => {
            ApiError::bad_request("Password and Confirm Password must be the same")
        }
        account::RegisterError::Database(e) => {
            tracing::error!(error = %e, "user insert failed");
            ApiError::internal(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
