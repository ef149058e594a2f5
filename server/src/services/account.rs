//! Account service: user registration with salted password digests.
//!
//! Passwords are stored as `{salt}${digest}`, both lowercase hex, where the
//! digest is SHA-256 over salt bytes followed by password bytes. Credential
//! checking belongs to the auth collaborator that fronts this service; the
//! digest never leaves the database layer here.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("password and confirmation differ")]
    PasswordMismatch,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from user queries. Deliberately excludes the password digest.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`register_user`].
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; SALT_LEN] = rand::rng().random();
    to_hex(&bytes)
}

/// Produce the stored `{salt}${digest}` form for a password.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    format!("{salt}${}", to_hex(&digest))
}

/// Register a new user.
///
/// # Errors
///
/// Returns `PasswordMismatch` when the confirmation differs from the
/// password, or a database error if the insert fails (a duplicate email
/// trips the unique constraint).
pub async fn register_user(pool: &PgPool, input: NewUser<'_>) -> Result<UserRow, RegisterError> {
    if input.password != input.confirm_password {
        return Err(RegisterError::PasswordMismatch);
    }

    let stored = hash_password(input.password, &generate_salt());
    let id = Uuid::new_v4();
    let row = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
        "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4) \
         RETURNING id, username, email, created_at",
    )
    .bind(id)
    .bind(input.username)
    .bind(input.email)
    .bind(&stored)
    .fetch_one(pool)
    .await?;

    Ok(UserRow { id: row.0, username: row.1, email: row.2, created_at: row.3 })
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
