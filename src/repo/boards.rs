use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Board, BoardInput, BoardWithColumns, Column, ColumnWithTasks, Task};
use crate::ownership;

const BOARD_COLUMNS: &str = "id, title, description, user_id, created_at";

/// Lists the user's boards (newest first), each with nested columns and
/// tasks in display order.
pub async fn list(pool: &PgPool, user_id: i32) -> Result<Vec<BoardWithColumns>, AppError> {
    let boards = sqlx::query_as::<_, Board>(&format!(
        "SELECT {BOARD_COLUMNS} FROM boards WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    attach_columns(pool, boards).await
}

/// Creates a board for the user. The title must be non-empty after trimming.
pub async fn create(pool: &PgPool, user_id: i32, input: &BoardInput) -> Result<Board, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let board = sqlx::query_as::<_, Board>(&format!(
        "INSERT INTO boards (id, title, description, user_id) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {BOARD_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(&input.description)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(board)
}

/// Fetches one owned board with nested columns and tasks.
pub async fn get(
    pool: &PgPool,
    board_id: Uuid,
    user_id: i32,
) -> Result<BoardWithColumns, AppError> {
    let board = ownership::resolve_board(pool, board_id, user_id).await?;

    let mut nested = attach_columns(pool, vec![board]).await?;
    // attach_columns preserves its input, so exactly one element comes back.
    nested
        .pop()
        .ok_or_else(|| AppError::InternalServerError("board nesting produced no result".into()))
}

/// Updates title/description of an owned board.
///
/// The write itself is scoped by id and owner; zero affected rows means the
/// board vanished between the ownership check and the write.
pub async fn update(
    pool: &PgPool,
    board_id: Uuid,
    user_id: i32,
    input: &BoardInput,
) -> Result<Board, AppError> {
    ownership::resolve_board(pool, board_id, user_id).await?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    sqlx::query_as::<_, Board>(&format!(
        "UPDATE boards SET title = $1, description = $2 \
         WHERE id = $3 AND user_id = $4 \
         RETURNING {BOARD_COLUMNS}"
    ))
    .bind(title)
    .bind(&input.description)
    .bind(board_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Board not found".into()))
}

/// Deletes an owned board and cascades to its columns and their tasks in a
/// single transaction. Returns the board's prior state.
pub async fn delete(pool: &PgPool, board_id: Uuid, user_id: i32) -> Result<Board, AppError> {
    let prior = ownership::resolve_board(pool, board_id, user_id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tasks WHERE column_id IN (SELECT id FROM columns WHERE board_id = $1)")
        .bind(board_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM columns WHERE board_id = $1")
        .bind(board_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM boards WHERE id = $1 AND user_id = $2")
        .bind(board_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    // Dropping the transaction without commit rolls the cascade back.
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Board not found".into()));
    }

    tx.commit().await?;
    Ok(prior)
}

/// Loads the columns and tasks for a set of boards and assembles the
/// nested representation, preserving board order.
async fn attach_columns(
    pool: &PgPool,
    boards: Vec<Board>,
) -> Result<Vec<BoardWithColumns>, AppError> {
    let board_ids: Vec<Uuid> = boards.iter().map(|b| b.id).collect();

    let columns = sqlx::query_as::<_, Column>(
        "SELECT id, title, position, board_id, created_at FROM columns \
         WHERE board_id = ANY($1) \
         ORDER BY position ASC, created_at DESC",
    )
    .bind(&board_ids)
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

    let mut columns_by_board: HashMap<Uuid, Vec<ColumnWithTasks>> = HashMap::new();
    for column in columns {
        let board_id = column.board_id;
        let tasks = tasks_by_column.remove(&column.id).unwrap_or_default();
        columns_by_board
            .entry(board_id)
            .or_default()
            .push(ColumnWithTasks { column, tasks });
    }

    Ok(boards
        .into_iter()
        .map(|board| {
            let columns = columns_by_board.remove(&board.id).unwrap_or_default();
            BoardWithColumns { board, columns }
        })
        .collect())
}
