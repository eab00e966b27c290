use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A category row from `tb_category`.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub description: String,
}

/// Input payload for creating a category.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
}

/// Partial update payload for a category.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 255))]
    pub description: Option<String>,
}
