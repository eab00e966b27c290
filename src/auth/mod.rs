pub mod middleware;
pub mod password;
pub mod token;

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::models::{User, ADMIN_USER_TYPE_ID};

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password in plaintext; compared against the stored bcrypt hash.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after a successful login.
///
/// The `userId` and `username` fields are plain display data for the client
/// and are not reused for authorization; the token alone carries identity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub msg: String,
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub username: String,
}

/// Stricter gate for administrative actions, applied inside the user update
/// and user delete handlers only.
///
/// Decodes the token's email claim and looks the user up; the request is
/// rejected with 403 when the header is missing, the token does not verify,
/// the user no longer exists, or the user's type is not the administrator
/// type.
pub async fn require_admin(
    req: &HttpRequest,
    pool: &PgPool,
    secret: &str,
) -> Result<(), AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Forbidden("No token provided".into()))?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    let claims = verify_token(token, secret)
        .map_err(|_| AppError::Forbidden("Failed to authenticate token".into()))?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password, user_type_id FROM tb_user WHERE email = $1",
    )
    .bind(&claims.sub)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) if user.user_type_id == ADMIN_USER_TYPE_ID => Ok(()),
        _ => Err(AppError::Forbidden("User is not an admin".into())),
    }
}
