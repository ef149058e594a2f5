//! Router assembly and the shared response envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint answers `{"data": ..., "message": ...}` on success and
//! `{"status": "error", "message": ...}` with a non-2xx code on failure.
//! The envelope lives here so no handler can drift from it.

pub mod boards;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// REST router: tactic CRUD, per-user listing, registration, liveness.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/board", post(boards::create_tactic))
        .route(
            "/api/board/{id}",
            get(boards::get_tactic)
                .patch(boards::save_board_data)
                .delete(boards::delete_tactic),
        )
        .route("/api/board/{id}/change-title", patch(boards::change_title))
        .route("/api/users/{user_id}/tactics", get(boards::list_user_tactics))
        .route("/api/register", post(users::register))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Success envelope shared by every endpoint.
pub(crate) fn success<T: Serialize>(status: StatusCode, data: &T, message: &str) -> Response {
    (status, Json(json!({ "data": data, "message": message }))).into_response()
}

/// Failure half of the envelope. Handlers return this; Axum renders it.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub(crate) fn bad_request(message: &str) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.to_owned() }
    }

    pub(crate) fn not_found(message: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.to_owned() }
    }

    pub(crate) fn internal(message: String) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "status": "error", "message": self.message }))).into_response()
    }
}
