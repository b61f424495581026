use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, AuthenticatedUser,
        LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::PublicUser,
    repo::users,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns the signed token alongside the
/// public user fields.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    // Exact, case-sensitive duplicate check on both unique columns.
    let existing =
        users::find_by_username_or_email(&pool, &register_data.username, &register_data.email)
            .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username or email already exists".into()));
    }

    let password_hash = hash_password(&register_data.password)?;
    let user = users::insert(
        &pool,
        &register_data.username,
        &register_data.email,
        &password_hash,
    )
    .await?;

    let token = generate_token(&user)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        message: "User registered successfully".into(),
        user: PublicUser::from(&user),
        token,
    }))
}

/// Login user
///
/// Authenticates a user and returns a fresh token. Unknown email and wrong
/// password produce identical responses so callers cannot enumerate users.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = users::find_by_email(&pool, &login_data.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&login_data.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = generate_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        message: "Logged in successfully".into(),
        user: PublicUser::from(&user),
        token,
    }))
}

/// Returns the identity decoded from the presented token.
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": user.0
    })))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
