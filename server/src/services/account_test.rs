use super::*;
use crate::state::test_helpers;

// --- salts and digests ---

#[test]
fn generate_salt_is_hex_of_fixed_length() {
    let salt = generate_salt();
    assert_eq!(salt.len(), SALT_LEN * 2);
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_salt_varies_between_calls() {
    assert_ne!(generate_salt(), generate_salt());
}

#[test]
fn hash_password_prefixes_the_salt() {
    let stored = hash_password("open sesame", "00ff");
    let (salt, digest) = stored.split_once('$').expect("stored form should contain a separator");
    assert_eq!(salt, "00ff");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_password_is_stable_per_salt() {
    assert_eq!(hash_password("pw", "aa"), hash_password("pw", "aa"));
    assert_ne!(hash_password("pw", "aa"), hash_password("pw", "ab"));
    assert_ne!(hash_password("pw", "aa"), hash_password("pw2", "aa"));
}

#[test]
fn stored_digest_can_be_rechecked_from_its_own_salt() {
    let stored = hash_password("open sesame", &generate_salt());
    let (salt, _) = stored.split_once('$').expect("stored form should contain a separator");
    assert_eq!(hash_password("open sesame", salt), stored);
    assert_ne!(hash_password("let me in", salt), stored);
}

// --- registration ---

#[tokio::test]
async fn register_rejects_mismatched_confirmation_before_touching_the_db() {
    let pool = test_helpers::lazy_pool();
    let result = register_user(
        &pool,
        NewUser {
            username: "coach",
            email: "coach@example.com",
            password: "secret",
            confirm_password: "secrett",
        },
    )
    .await;
    assert!(matches!(result, Err(RegisterError::PasswordMismatch)));
}

#[tokio::test]
async fn register_against_lazy_pool_is_a_database_error() {
    let pool = test_helpers::lazy_pool();
    let result = register_user(
        &pool,
        NewUser {
            username: "coach",
            email: "coach@example.com",
            password: "secret",
            confirm_password: "secret",
        },
    )
    .await;
    assert!(matches!(result, Err(RegisterError::Database(_))));
}

// --- live database ---

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn register_persists_a_recheckable_digest() {
    let pool = test_helpers::integration_pool().await;

    let user = register_user(
        &pool,
        NewUser {
            username: "coach",
            email: "coach@example.com",
            password: "secret",
            confirm_password: "secret",
        },
    )
    .await
    .expect("register_user should succeed");
    assert_eq!(user.username, "coach");
    assert_eq!(user.email, "coach@example.com");

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .expect("user row should exist");
    let (salt, _) = stored.split_once('$').expect("stored form should contain a separator");
    assert_eq!(hash_password("secret", salt), stored);

    let duplicate = register_user(
        &pool,
        NewUser {
            username: "other",
            email: "coach@example.com",
            password: "secret",
            confirm_password: "secret",
        },
    )
    .await;
    assert!(matches!(duplicate, Err(RegisterError::Database(_))));
}
