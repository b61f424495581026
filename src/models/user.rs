use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user row as stored in the database.
///
/// The password hash is carried for credential verification but never
/// serialized into a response.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The subset of a user exposed by the auth endpoints.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
