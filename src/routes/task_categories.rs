use crate::{
    error::AppError,
    models::{
        task_category::TaskCategoryDetailRow, TaskCategory, TaskCategoryDetail,
        TaskCategoryInput, TaskCategoryUpdate,
    },
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

/// Response carrying a confirmation message plus the affected association
/// row; this entity is the one whose create/update responses include the
/// record.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskCategoryResponse {
    pub msg: String,
    #[serde(rename = "taskCategory")]
    pub task_category: TaskCategory,
}

const DETAIL_SELECT: &str = "SELECT tc.id, tc.task_id, tc.category_id, \
        t.title AS task_title, t.description AS task_description, \
        t.state AS task_state, t.deadline AS task_deadline, \
        t.user_id AS task_user_id, u.name AS task_user_name, \
        c.description AS category_description \
     FROM tb_taskcategory tc \
     INNER JOIN tb_task t ON t.id = tc.task_id \
     INNER JOIN tb_category c ON c.id = tc.category_id \
     LEFT JOIN tb_user u ON u.id = t.user_id";

/// List all task-category associations
///
/// Each row carries the joined task and category as nested objects.
#[utoipa::path(
    get,
    path = "/api/tasks-categories",
    tag = "tasks-categories",
    responses((status = 200, description = "All associations", body = [TaskCategoryDetail])),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_task_categories(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let rows = sqlx::query_as::<_, TaskCategoryDetailRow>(&format!(
        "{} ORDER BY tc.id",
        DETAIL_SELECT
    ))
    .fetch_all(&**pool)
    .await?;

    let details: Vec<TaskCategoryDetail> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(details))
}

/// List a user's task-category associations
///
/// The user must exist; unlike tasks-by-user, an empty result answers 200
/// with an empty array.
#[utoipa::path(
    get,
    path = "/api/tasks-categories/user/{id}",
    tag = "tasks-categories",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Associations for the user's tasks", body = [TaskCategoryDetail]),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/user/{id}")]
pub async fn get_task_categories_by_user(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user_id = id.into_inner();

    let user_exists = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_user WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&**pool)
        .await?;

    if user_exists.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }

    let rows = sqlx::query_as::<_, TaskCategoryDetailRow>(&format!(
        "{} WHERE t.user_id = $1 ORDER BY tc.id",
        DETAIL_SELECT
    ))
    .bind(user_id)
    .fetch_all(&**pool)
    .await?;

    let details: Vec<TaskCategoryDetail> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(details))
}

/// Create a task-category association
///
/// Responds 201 with the created row.
#[utoipa::path(
    post,
    path = "/api/tasks-categories",
    tag = "tasks-categories",
    request_body = TaskCategoryInput,
    responses(
        (status = 201, description = "Association created", body = TaskCategoryResponse),
        (status = 500, description = "Referenced task or category does not exist")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_task_category(
    pool: web::Data<PgPool>,
    input: web::Json<TaskCategoryInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let created = sqlx::query_as::<_, TaskCategory>(
        "INSERT INTO tb_taskcategory (task_id, category_id) VALUES ($1, $2) \
         RETURNING id, task_id, category_id",
    )
    .bind(input.task_id)
    .bind(input.category_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(TaskCategoryResponse {
        msg: "Task category added successfully".to_string(),
        task_category: created,
    }))
}

/// Update a task-category association
///
/// Responds with the updated row; a missing target answers 404.
#[utoipa::path(
    put,
    path = "/api/tasks-categories/{id}",
    tag = "tasks-categories",
    params(("id" = i32, Path, description = "Association id")),
    request_body = TaskCategoryUpdate,
    responses(
        (status = 200, description = "Association updated", body = TaskCategoryResponse),
        (status = 404, description = "Association not found")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_task_category(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
    input: web::Json<TaskCategoryUpdate>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let id = id.into_inner();

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_taskcategory WHERE id = $1")
        .bind(id)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(format!(
            "Task category with id {} not found",
            id
        )));
    }

    let updated = sqlx::query_as::<_, TaskCategory>(
        "UPDATE tb_taskcategory SET \
             task_id = COALESCE($1, task_id), \
             category_id = COALESCE($2, category_id) \
         WHERE id = $3 \
         RETURNING id, task_id, category_id",
    )
    .bind(input.task_id)
    .bind(input.category_id)
    .bind(id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(TaskCategoryResponse {
        msg: format!("Task category with id {} updated", id),
        task_category: updated,
    }))
}
