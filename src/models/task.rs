use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A task row from `tb_task`.
///
/// There are no created/updated timestamps; the schema tracks only the
/// fields below.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Free-form state label (e.g. "new", "in progress").
    pub state: Option<String>,
    /// Optional deadline date.
    pub deadline: Option<NaiveDate>,
    /// Identifier of the user who owns the task.
    pub user_id: Option<i32>,
}

/// Input payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub state: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub user_id: Option<i32>,
}

/// Partial update payload for a task. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub state: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub user_id: Option<i32>,
}

/// A task joined to its owner's name, as returned by get-by-id.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaskWithUser {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub user_id: Option<i32>,
    /// Name of the owning user (inner join, so always present).
    pub user_name: String,
}
