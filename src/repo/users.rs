use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, role, password_hash, created_at";

/// Looks up a user by exact username or email match (case-sensitive).
pub async fn find_by_username_or_email(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $2"
    ))
    .bind(username)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Inserts a new user. A concurrent duplicate that slips past the
/// pre-check is caught by the unique constraints and reported as the same
/// conflict.
pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash) \
         VALUES ($1, $2, $3) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Username or email already exists"))
}
