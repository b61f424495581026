use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::task::Task;

/// A column inside a board. `order` is the client-assigned display position
/// (stored as `position` in the database); siblings are never renumbered.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "position")]
    pub order: i32,
    pub board_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating a column.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(range(min = 0))]
    pub order: i32,

    pub board_id: Uuid,
}

/// Input payload for updating a column. The parent board cannot be changed.
#[derive(Debug, Deserialize, Validate)]
pub struct ColumnUpdate {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(range(min = 0))]
    pub order: i32,
}

/// Query parameters for the column listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnQuery {
    pub board_id: Option<Uuid>,
}

/// A column with its tasks, as returned by listing and detail endpoints.
#[derive(Debug, Serialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<Task>,
}
