use sqlx::PgPool;
use uuid::Uuid;

use crate::dates::parse_optional_date;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use crate::ownership;

const TASK_COLUMNS: &str = "id, title, description, due_date, position, column_id, created_at";

const DUPLICATE_TITLE: &str = "Task title already exists in this column";

// Scopes a task write to rows whose ownership chain roots at the user.
const OWNED_BY: &str =
    "column_id IN (SELECT c.id FROM columns c JOIN boards b ON b.id = c.board_id WHERE b.user_id = $1)";

/// Lists the tasks of an owned column in display order with newest-first
/// tiebreak.
pub async fn list_for_column(
    pool: &PgPool,
    column_id: Uuid,
    user_id: i32,
) -> Result<Vec<Task>, AppError> {
    ownership::resolve_column(pool, column_id, user_id).await?;

    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE column_id = $1 \
         ORDER BY position ASC, created_at DESC"
    ))
    .bind(column_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Creates a task in a column the user owns.
pub async fn create(pool: &PgPool, user_id: i32, input: &TaskInput) -> Result<Task, AppError> {
    ownership::resolve_column(pool, input.column_id, user_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let due_date = parse_optional_date(input.due_date.as_ref())?;

    sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, title, description, due_date, position, column_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(&input.description)
    .bind(due_date)
    .bind(input.order)
    .bind(input.column_id)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_TITLE))
}

/// Fetches one task after walking its full ownership chain.
pub async fn get(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
    ownership::resolve_task(pool, task_id, user_id).await
}

/// Updates a task the user owns through the chain. The write is a single
/// ownership-scoped statement; zero affected rows means the task vanished
/// between the check and the write.
pub async fn update(
    pool: &PgPool,
    task_id: Uuid,
    user_id: i32,
    input: &TaskUpdate,
) -> Result<Task, AppError> {
    ownership::resolve_task(pool, task_id, user_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let due_date = parse_optional_date(input.due_date.as_ref())?;

    sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $2, description = $3, due_date = $4, position = $5 \
         WHERE id = $6 AND {OWNED_BY} \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(user_id)
    .bind(title)
    .bind(&input.description)
    .bind(due_date)
    .bind(input.order)
    .bind(task_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_TITLE))?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Deletes a task the user owns through the chain and returns its prior
/// state.
pub async fn delete(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
    let prior = ownership::resolve_task(pool, task_id, user_id).await?;

    let result = sqlx::query(&format!("DELETE FROM tasks WHERE id = $2 AND {OWNED_BY}"))
        .bind(user_id)
        .bind(task_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(prior)
}
