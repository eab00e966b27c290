use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A user row from `tb_user`.
///
/// The stored password is a bcrypt hash and is never serialized into
/// responses.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[schema(write_only)]
    pub password: String,
    pub user_type_id: i32,
}

/// Input payload for creating a user. `user_type_id` defaults to the
/// non-admin type when absent.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub user_type_id: Option<i32>,
}

/// Partial update payload for a user. Absent fields are left unchanged,
/// including the password: it is re-hashed only when a new one is supplied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub user_type_id: Option<i32>,
}
