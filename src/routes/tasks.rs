use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskQuery, TaskUpdate},
    repo::tasks,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Lists the tasks of one owned column in display order.
#[get("/tasks")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let column_id = query
        .column_id
        .ok_or_else(|| AppError::BadRequest("columnId query parameter is required".into()))?;

    let tasks = tasks::list_for_column(&pool, column_id, user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": tasks })))
}

/// Creates a task in an owned column.
#[post("/task")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    input: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let task = tasks::create(&pool, user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": task })))
}

/// Fetches one task after walking its full ownership chain.
#[get("/task/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks::get(&pool, task_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": task })))
}

/// Updates an owned task.
#[patch("/task/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    input: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let task = tasks::update(&pool, task_id.into_inner(), user.user_id(), &input).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": task })))
}

/// Deletes an owned task and returns its prior state.
#[delete("/task/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks::delete(&pool, task_id.into_inner(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": task })))
}
