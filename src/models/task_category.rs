use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A task-category association row from `tb_taskcategory`.
///
/// A task may carry multiple categories. Rows are removed by the database
/// cascade when the referenced task is deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaskCategory {
    pub id: i32,
    pub task_id: i32,
    pub category_id: i32,
}

/// Input payload for creating an association. Both ids are required.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskCategoryInput {
    pub task_id: i32,
    pub category_id: i32,
}

/// Partial update payload for an association.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskCategoryUpdate {
    pub task_id: Option<i32>,
    pub category_id: Option<i32>,
}

/// Flat join row produced by the task-category listing queries. Columns from
/// the joined task and category are aliased to avoid name collisions.
#[derive(Debug, FromRow)]
pub struct TaskCategoryDetailRow {
    pub id: i32,
    pub task_id: i32,
    pub category_id: i32,
    pub task_title: String,
    pub task_description: Option<String>,
    pub task_state: Option<String>,
    pub task_deadline: Option<NaiveDate>,
    pub task_user_id: Option<i32>,
    pub task_user_name: Option<String>,
    pub category_description: String,
}

/// The task half of a [`TaskCategoryDetail`], including the owner's name
/// when the owning user exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskRef {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub user_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// The category half of a [`TaskCategoryDetail`].
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i32,
    pub description: String,
}

/// An association with its task and category joined in as nested objects.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskCategoryDetail {
    pub id: i32,
    pub task_id: i32,
    pub category_id: i32,
    pub task: TaskRef,
    pub category: CategoryRef,
}

impl From<TaskCategoryDetailRow> for TaskCategoryDetail {
    fn from(row: TaskCategoryDetailRow) -> Self {
        Self {
            id: row.id,
            task_id: row.task_id,
            category_id: row.category_id,
            task: TaskRef {
                id: row.task_id,
                title: row.task_title,
                description: row.task_description,
                state: row.task_state,
                deadline: row.task_deadline,
                user_id: row.task_user_id,
                user_name: row.task_user_name,
            },
            category: CategoryRef {
                id: row.category_id,
                description: row.category_description,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> TaskCategoryDetailRow {
        TaskCategoryDetailRow {
            id: 5,
            task_id: 1,
            category_id: 3,
            task_title: "Write report".to_string(),
            task_description: Some("Quarterly numbers".to_string()),
            task_state: Some("new".to_string()),
            task_deadline: NaiveDate::from_ymd_opt(2024, 5, 20),
            task_user_id: Some(1),
            task_user_name: Some("Juan".to_string()),
            category_description: "High priority".to_string(),
        }
    }

    #[test]
    fn test_detail_nesting() {
        let detail = TaskCategoryDetail::from(sample_row());
        assert_eq!(detail.id, 5);
        assert_eq!(detail.task.id, detail.task_id);
        assert_eq!(detail.category.id, detail.category_id);
        assert_eq!(detail.task.title, "Write report");
        assert_eq!(detail.category.description, "High priority");
    }

    #[test]
    fn test_detail_omits_absent_user_name() {
        let mut row = sample_row();
        row.task_user_name = None;
        let json = serde_json::to_value(TaskCategoryDetail::from(row)).unwrap();
        assert!(json["task"].get("user_name").is_none());
        assert_eq!(json["task"]["title"], "Write report");
    }
}
