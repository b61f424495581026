use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A task inside a column, the leaf of the ownership chain
/// Task -> Column -> Board -> User.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    /// The title of the task, unique within its column.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Client-assigned display position; never renumbered by the server.
    #[sqlx(rename = "position")]
    pub order: i32,
    /// The column this task belongs to.
    pub column_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating a task.
///
/// `due_date` is taken as raw JSON because the API accepts either an
/// RFC 3339 / `YYYY-MM-DD` string or a milliseconds-since-epoch number;
/// it is parsed by [`crate::dates::parse_optional_date`].
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default)]
    pub due_date: Option<serde_json::Value>,

    #[validate(range(min = 0))]
    pub order: i32,

    pub column_id: Uuid,
}

/// Input payload for updating a task. The parent column cannot be changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default)]
    pub due_date: Option<serde_json::Value>,

    #[validate(range(min = 0))]
    pub order: i32,
}

/// Query parameters for the task listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    pub column_id: Option<Uuid>,
}
