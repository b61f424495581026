//! Ownership resolution for the chain Task -> Column -> Board -> User.
//!
//! Every mutating repository operation routes through one of these
//! resolvers before touching the store; there is no secondary enforcement
//! layer. Each resolver is one joined lookup returning the entity together
//! with the root owner's id.
//!
//! Policy, applied uniformly: a row that does not exist is `NotFound`; a row
//! that exists under another owner is `Unauthorized`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Board, Column, Task};

#[derive(sqlx::FromRow)]
struct ColumnChainRow {
    #[sqlx(flatten)]
    column: Column,
    owner_id: i32,
}

#[derive(sqlx::FromRow)]
struct TaskChainRow {
    #[sqlx(flatten)]
    task: Task,
    owner_id: i32,
}

/// The pure owner comparison at the end of every chain walk.
fn authorize(owner_id: i32, user_id: i32, denial: &str) -> Result<(), AppError> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(AppError::Unauthorized(denial.to_string()))
    }
}

/// Loads a board and confirms `user_id` is its owner.
pub async fn resolve_board(
    pool: &PgPool,
    board_id: Uuid,
    user_id: i32,
) -> Result<Board, AppError> {
    let board = sqlx::query_as::<_, Board>(
        "SELECT id, title, description, user_id, created_at FROM boards WHERE id = $1",
    )
    .bind(board_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Board not found".into()))?;

    authorize(board.user_id, user_id, "You do not own this board")?;
    Ok(board)
}

/// Loads a column with its parent board's owner id in one lookup and
/// confirms `user_id` is the root owner.
pub async fn resolve_column(
    pool: &PgPool,
    column_id: Uuid,
    user_id: i32,
) -> Result<Column, AppError> {
    let row = sqlx::query_as::<_, ColumnChainRow>(
        "SELECT c.id, c.title, c.position, c.board_id, c.created_at, b.user_id AS owner_id \
         FROM columns c \
         JOIN boards b ON b.id = c.board_id \
         WHERE c.id = $1",
    )
    .bind(column_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Column not found".into()))?;

    authorize(row.owner_id, user_id, "You do not own this column")?;
    Ok(row.column)
}

/// Walks Task -> Column -> Board -> owner in one joined lookup and confirms
/// `user_id` is the root owner.
pub async fn resolve_task(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
    let row = sqlx::query_as::<_, TaskChainRow>(
        "SELECT t.id, t.title, t.description, t.due_date, t.position, t.column_id, t.created_at, \
                b.user_id AS owner_id \
         FROM tasks t \
         JOIN columns c ON c.id = t.column_id \
         JOIN boards b ON b.id = c.board_id \
         WHERE t.id = $1",
    )
    .bind(task_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    authorize(row.owner_id, user_id, "You do not own this task")?;
    Ok(row.task)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_accepts_the_owner() {
        assert!(authorize(42, 42, "nope").is_ok());
    }

    #[test]
    fn test_authorize_rejects_everyone_else() {
        match authorize(42, 7, "You do not own this board") {
            Err(AppError::Unauthorized(msg)) => {
                assert_eq!(msg, "You do not own this board");
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }
}
