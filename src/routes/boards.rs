use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::BoardInput,
    repo::boards,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Lists the authenticated user's boards, newest first, with nested
/// columns and tasks.
#[get("/boards")]
pub async fn get_boards(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let boards = boards::list(&pool, user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": boards })))
}

/// Creates a board owned by the authenticated user.
#[post("/board")]
pub async fn create_board(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    input: web::Json<BoardInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let board = boards::create(&pool, user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": board })))
}

/// Fetches one owned board with nested columns and tasks.
#[get("/board/{id}")]
pub async fn get_board(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    board_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let board = boards::get(&pool, board_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": board })))
}

/// Updates title/description of an owned board.
#[patch("/board/{id}")]
pub async fn update_board(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    board_id: web::Path<Uuid>,
    input: web::Json<BoardInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let board = boards::update(&pool, board_id.into_inner(), user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": board })))
}

/// Deletes an owned board (cascading to columns and tasks) and returns its
/// prior state.
#[delete("/board/{id}")]
pub async fn delete_board(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    board_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let board = boards::delete(&pool, board_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": board })))
}
