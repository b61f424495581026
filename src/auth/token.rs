use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Tokens expire one hour after issuance.
const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// The claims embedded in a bearer token and attached to authenticated
/// requests by the middleware gate.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's unique identifier.
    pub sub: i32,
    pub username: String,
    pub role: Option<String>,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates a signed token for the given user.
///
/// Requires the `JWT_SECRET` environment variable for signing.
pub fn generate_token(user: &User) -> Result<String, AppError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: Some(user.role.clone()),
        iat: now as usize,
        exp: (now + TOKEN_TTL_SECONDS) as usize,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a token string and decodes its claims.
///
/// Fails with `AppError::Unauthorized` when the token is malformed, expired,
/// or carries an invalid signature.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
