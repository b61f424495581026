use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ColumnInput, ColumnQuery, ColumnUpdate},
    ownership,
    repo::columns,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Lists the columns of one owned board, with nested tasks.
#[get("/columns")]
pub async fn get_columns(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<ColumnQuery>,
) -> Result<impl Responder, AppError> {
    let board_id = query
        .board_id
        .ok_or_else(|| AppError::BadRequest("boardId query parameter is required".into()))?;

    ownership::resolve_board(&pool, board_id, user.user_id()).await?;

    let columns = columns::list_for_board(&pool, board_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": columns })))
}

/// Creates a column on an owned board.
#[post("/column")]
pub async fn create_column(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    input: web::Json<ColumnInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let column = columns::create(&pool, user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": column })))
}

/// Fetches one owned column with its tasks.
#[get("/column/{id}")]
pub async fn get_column(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    column_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let column = columns::get_with_tasks(&pool, column_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": column })))
}

/// Updates title/order of an owned column.
#[patch("/column/{id}")]
pub async fn update_column(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    column_id: web::Path<Uuid>,
    input: web::Json<ColumnUpdate>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let column = columns::update(&pool, column_id.into_inner(), user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": column })))
}

/// Deletes an owned column and its tasks, returning the column's prior
/// state.
#[delete("/column/{id}")]
pub async fn delete_column(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    column_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let column = columns::delete(&pool, column_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": column })))
}
