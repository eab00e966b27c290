use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The user type checked by the admin gate.
pub const ADMIN_USER_TYPE_ID: i32 = 1;

/// The user type assigned to newly created users when none is supplied.
pub const DEFAULT_USER_TYPE_ID: i32 = 2;

/// A role referenced by users. Rows live in `tb_usertype` and are seeded by
/// the initial migration; there are no endpoints for managing them.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserType {
    pub id: i32,
    pub description: String,
}
