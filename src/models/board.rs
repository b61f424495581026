use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::column::ColumnWithTasks;

/// A board owned by exactly one user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating or updating a board.
#[derive(Debug, Deserialize, Validate)]
pub struct BoardInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// A board together with its ordered columns and their tasks, as returned
/// by the listing and detail endpoints.
#[derive(Debug, Serialize)]
pub struct BoardWithColumns {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnWithTasks>,
}
