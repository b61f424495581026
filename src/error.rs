//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent the failure taxonomy of the API: bad input, missing or
//! invalid credentials, absent resources, uniqueness conflicts, and store
//! failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` so every failure
//! is rendered as the uniform `{"success": false, "message": ...}` envelope
//! with the matching status code. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError` allow propagation with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing/invalid token, or a resource owned by another user (HTTP 401).
    Unauthorized(String),
    /// Malformed or missing input (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was violated (HTTP 409).
    Conflict(String),
    /// The store did not yield a connection in time (HTTP 503, retryable).
    Timeout(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Error originating from database operations (HTTP 500).
    /// The detail is logged at the boundary, never sent to the client.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "success": false,
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "success": false,
                "message": msg
            })),
            AppError::Timeout(msg) => {
                log::warn!("store timeout: {}", msg);
                HttpResponse::ServiceUnavailable().json(json!({
                    "success": false,
                    "message": "Service temporarily unavailable, please retry"
                }))
            }
            // Server-side detail is logged here and replaced by a generic
            // message in the response body.
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Internal server error"
                }))
            }
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "message": "Internal server error"
                }))
            }
        }
    }
}

impl AppError {
    /// Translates a store-level unique-constraint violation into a domain
    /// `Conflict` with the given message; every other error passes through
    /// the usual `From<sqlx::Error>` mapping.
    pub fn conflict_on_unique(error: sqlx::Error, message: &str) -> AppError {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => error.into(),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`, pool acquisition timeouts map to the
/// retryable `Timeout` variant, everything else becomes `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::PoolTimedOut => {
                AppError::Timeout("timed out acquiring a database connection".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
