//! Tactic service: CRUD over the `tactics` table.
//!
//! DESIGN
//! ======
//! Every statement round-trips the full column set (insert/update/delete use
//! `RETURNING`) so route handlers can echo the affected row in the response
//! envelope without a second query. `updated_at` is bumped in the UPDATE
//! statements themselves; there is no trigger.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TacticError {
    #[error("tactic not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from tactic queries. Mirrors the `tactics` table.
#[derive(Debug, Clone)]
pub struct TacticRow {
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

/// Input for [`create_tactic`].
#[derive(Debug, Clone, Copy)]
pub struct NewTactic<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub board_type: &'a str,
    pub board_data: &'a serde_json::Value,
    pub user_id: Uuid,
}

/// Column list shared by every SELECT / RETURNING clause below. Order must
/// match [`TacticTuple`].
const TACTIC_COLUMNS: &str =
    "id, title, description, board_type, board_data, is_public, is_archived, user_id, created_at, updated_at";

type TacticTuple = (
    Uuid,
    String,
    String,
    String,
    serde_json::Value,
    bool,
    bool,
    Uuid,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn from_tuple(row: TacticTuple) -> TacticRow {
    let (id, title, description, board_type, board_data, is_public, is_archived, user_id, created_at, updated_at) =
        row;
    TacticRow {
        id,
        title,
        description,
        board_type,
        board_data,
        is_public,
        is_archived,
        user_id,
        created_at,
        updated_at,
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a tactic.
///
/// # Errors
///
/// Returns a database error if the insert fails (including an unknown
/// `user_id`, which trips the foreign key).
pub async fn create_tactic(pool: &PgPool, input: NewTactic<'_>) -> Result<TacticRow, TacticError> {
    let id = Uuid::new_v4();
    let sql = format!(
        "INSERT INTO tactics (id, title, description, board_type, board_data, user_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {TACTIC_COLUMNS}"
    );
    let row = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.board_type)
        .bind(input.board_data)
        .bind(input.user_id)
        .fetch_one(pool)
        .await?;

    Ok(from_tuple(row))
}

/// Fetch one tactic by id.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error if the query
/// fails.
pub async fn fetch_tactic(pool: &PgPool, id: Uuid) -> Result<TacticRow, TacticError> {
    let sql = format!("SELECT {TACTIC_COLUMNS} FROM tactics WHERE id = $1");
    let row = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(TacticError::NotFound(id))?;

    Ok(from_tuple(row))
}

/// Replace the persisted board snapshot wholesale.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error if the update
/// fails.
pub async fn replace_board_data(
    pool: &PgPool,
    id: Uuid,
    board_data: &serde_json::Value,
) -> Result<TacticRow, TacticError> {
    let sql = format!(
        "UPDATE tactics SET board_data = $2, updated_at = now() WHERE id = $1 RETURNING {TACTIC_COLUMNS}"
    );
    let row = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(id)
        .bind(board_data)
        .fetch_optional(pool)
        .await?
        .ok_or(TacticError::NotFound(id))?;

    Ok(from_tuple(row))
}

/// Change a tactic's title, leaving the rest of the row alone.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error if the update
/// fails.
pub async fn rename_tactic(pool: &PgPool, id: Uuid, new_title: &str) -> Result<TacticRow, TacticError> {
    let sql = format!(
        "UPDATE tactics SET title = $2, updated_at = now() WHERE id = $1 RETURNING {TACTIC_COLUMNS}"
    );
    let row = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(id)
        .bind(new_title)
        .fetch_optional(pool)
        .await?
        .ok_or(TacticError::NotFound(id))?;

    Ok(from_tuple(row))
}

/// Delete a tactic, returning the removed row.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error if the delete
/// fails.
pub async fn delete_tactic(pool: &PgPool, id: Uuid) -> Result<TacticRow, TacticError> {
    let sql = format!("DELETE FROM tactics WHERE id = $1 RETURNING {TACTIC_COLUMNS}");
    let row = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(TacticError::NotFound(id))?;

    Ok(from_tuple(row))
}

/// List a user's tactics, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_tactics(pool: &PgPool, user_id: Uuid) -> Result<Vec<TacticRow>, TacticError> {
    let sql = format!("SELECT {TACTIC_COLUMNS} FROM tactics WHERE user_id = $1 ORDER BY updated_at DESC");
    let rows = sqlx::query_as::<_, TacticTuple>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(from_tuple).collect())
}

#[cfg(test)]
#[path = "tactic_test.rs"]
mod tests;
