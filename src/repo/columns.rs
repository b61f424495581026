use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Column, ColumnInput, ColumnUpdate, ColumnWithTasks, Task};
use crate::ownership;

const COLUMN_COLUMNS: &str = "id, title, position, board_id, created_at";

const DUPLICATE_TITLE: &str = "Column title already exists in this board";

/// Lists the columns of a board with nested tasks, in display order with
/// newest-first tiebreak. The caller must have verified board ownership.
pub async fn list_for_board(
    pool: &PgPool,
    board_id: Uuid,
) -> Result<Vec<ColumnWithTasks>, AppError> {
    let columns = sqlx::query_as::<_, Column>(&format!(
        "SELECT {COLUMN_COLUMNS} FROM columns WHERE board_id = $1 \
         ORDER BY position ASC, created_at DESC"
    ))
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let column_ids: Vec<Uuid> = columns.iter().map(|c| c.id).collect();

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, due_date, position, column_id, created_at FROM tasks \
         WHERE column_id = ANY($1) \
         ORDER BY position ASC, created_at DESC",
    )
    .bind(&column_ids)
    .fetch_all(pool)
    .await?;

    let mut tasks_by_column: HashMap<Uuid, Vec<Task>> = HashMap::new();
    for task in tasks {
        tasks_by_column.entry(task.column_id).or_default().push(task);
    }

    Ok(columns
        .into_iter()
        .map(|column| {
            let tasks = tasks_by_column.remove(&column.id).unwrap_or_default();
            ColumnWithTasks { column, tasks }
        })
        .collect())
}

/// Creates a column on a board the user owns. Ownership goes through the
/// board resolver, not the column chain (there is no column yet).
pub async fn create(pool: &PgPool, user_id: i32, input: &ColumnInput) -> Result<Column, AppError> {
    ownership::resolve_board(pool, input.board_id, user_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    sqlx::query_as::<_, Column>(&format!(
        "INSERT INTO columns (id, title, position, board_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {COLUMN_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(input.order)
    .bind(input.board_id)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_TITLE))
}

/// Fetches one owned column with its tasks.
pub async fn get_with_tasks(
    pool: &PgPool,
    column_id: Uuid,
    user_id: i32,
) -> Result<ColumnWithTasks, AppError> {
    let column = ownership::resolve_column(pool, column_id, user_id).await?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, due_date, position, column_id, created_at FROM tasks \
         WHERE column_id = $1 \
         ORDER BY position ASC, created_at DESC",
    )
    .bind(column_id)
    .fetch_all(pool)
    .await?;

    Ok(ColumnWithTasks { column, tasks })
}

/// Updates title/order of a column. The column's board id is looked up
/// first, board ownership verified against it, then a single
/// ownership-scoped write is applied.
pub async fn update(
    pool: &PgPool,
    column_id: Uuid,
    user_id: i32,
    input: &ColumnUpdate,
) -> Result<Column, AppError> {
    let board_id = sqlx::query_as::<_, (Uuid,)>("SELECT board_id FROM columns WHERE id = $1")
        .bind(column_id)
        .fetch_optional(pool)
        .await?;

    let (board_id,) = board_id.ok_or_else(|| AppError::NotFound("Column not found".into()))?;
    ownership::resolve_board(pool, board_id, user_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    sqlx::query_as::<_, Column>(&format!(
        "UPDATE columns SET title = $1, position = $2 \
         WHERE id = $3 AND board_id IN (SELECT id FROM boards WHERE user_id = $4) \
         RETURNING {COLUMN_COLUMNS}"
    ))
    .bind(title)
    .bind(input.order)
    .bind(column_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_TITLE))?
    .ok_or_else(|| AppError::NotFound("Column not found".into()))
}

/// Deletes an owned column and all its tasks in a single transaction.
/// Returns the column's prior state.
pub async fn delete(pool: &PgPool, column_id: Uuid, user_id: i32) -> Result<Column, AppError> {
    let prior = ownership::resolve_column(pool, column_id, user_id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE column_id = $1")
        .bind(column_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query(
        "DELETE FROM columns \
         WHERE id = $1 AND board_id IN (SELECT id FROM boards WHERE user_id = $2)",
    )
    .bind(column_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Column not found".into()));
    }

    tx.commit().await?;
    Ok(prior)
}
