use crate::{
    auth::{
        generate_token, hash_password, require_admin, verify_password, LoginRequest,
        LoginResponse,
    },
    config::Config,
    error::AppError,
    models::{User, UserInput, UserUpdate, DEFAULT_USER_TYPE_ID},
};
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str = "id, name, email, password, user_type_id";

/// List all users
///
/// Returns every user row; passwords are never serialized.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All users", body = [User])),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_users(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user ORDER BY id",
        USER_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/{id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound(format!("User with id {} not found", id))),
    }
}

/// Register a new user
///
/// Open endpoint (no token). The email must not already be registered;
/// the password is stored as a bcrypt hash and the user type defaults to
/// the non-admin type when absent.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Email already registered or invalid input")
    )
)]
#[post("")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    input: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let existing = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(&input.email)
    .fetch_optional(&**pool)
    .await?;

    if existing.is_some() {
        return Err(AppError::BadRequest(format!(
            "User {} already exists!",
            input.email
        )));
    }

    let hashed_password = hash_password(&input.password)?;

    sqlx::query(
        "INSERT INTO tb_user (name, email, password, user_type_id) VALUES ($1, $2, $3, $4)",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&hashed_password)
    .bind(input.user_type_id.unwrap_or(DEFAULT_USER_TYPE_ID))
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("User {} created successfully!", input.name)
    })))
}

/// Login
///
/// Verifies the password against the stored hash and issues a 1-day HS256
/// token whose subject is the user's email. Both an unknown email and a
/// wrong password answer 400.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Unknown email or invalid password")
    )
)]
#[post("/login")]
pub async fn login_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login.validate()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(&login.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => {
            return Err(AppError::BadRequest(format!(
                "User {} not found!",
                login.email
            )))
        }
    };

    if !verify_password(&login.password, &user.password)? {
        return Err(AppError::BadRequest("Invalid password".into()));
    }

    let token = generate_token(&user.email, &config.jwt_secret)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        msg: "Logged in".to_string(),
        token,
        user_id: user.id,
        username: user.name,
    }))
}

/// Update a user (admin only)
///
/// Partial update: absent fields keep their stored value. A supplied
/// password is re-hashed; an absent one is preserved.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated"),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    id: web::Path<i32>,
    input: web::Json<UserUpdate>,
) -> Result<impl Responder, AppError> {
    require_admin(&req, &pool, &config.jwt_secret).await?;
    input.validate()?;

    let id = id.into_inner();
    let existing = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&**pool)
    .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(format!("User with id {} not found", id)));
    }

    let hashed_password = match &input.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    sqlx::query(
        "UPDATE tb_user SET \
             name = COALESCE($1, name), \
             email = COALESCE($2, email), \
             password = COALESCE($3, password), \
             user_type_id = COALESCE($4, user_type_id) \
         WHERE id = $5",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&hashed_password)
    .bind(input.user_type_id)
    .bind(id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("User with id {} updated", id)
    })))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Requester is not an admin"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    require_admin(&req, &pool, &config.jwt_secret).await?;

    let id = id.into_inner();
    let existing = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM tb_user WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&**pool)
    .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(format!("User with id {} not found", id)));
    }

    sqlx::query("DELETE FROM tb_user WHERE id = $1")
        .bind(id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("User with id {} deleted", id)
    })))
}
