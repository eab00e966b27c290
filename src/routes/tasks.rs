use crate::{
    error::AppError,
    models::{Task, TaskInput, TaskUpdate, TaskWithUser},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const TASK_COLUMNS: &str = "id, title, description, state, deadline, user_id";

/// List all tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    responses((status = 200, description = "All tasks", body = [Task])),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tb_task ORDER BY id",
        TASK_COLUMNS
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Get a task by id
///
/// Inner-joins the owning user, so the response carries `user_name` and a
/// task without an owner answers 404.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task joined to its owner's name", body = TaskWithUser),
        (status = 404, description = "No task with that id")
    ),
    security(("bearer_auth" = []))
)]
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();

    let task = sqlx::query_as::<_, TaskWithUser>(
        "SELECT t.id, t.title, t.description, t.state, t.deadline, t.user_id, \
                u.name AS user_name \
         FROM tb_task t \
         INNER JOIN tb_user u ON u.id = t.user_id \
         WHERE t.id = $1",
    )
    .bind(id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(format!("Task with id {} not found", id))),
    }
}

/// List tasks belonging to a user
///
/// The user must exist; an empty result set also answers 404.
#[utoipa::path(
    get,
    path = "/api/tasks/user/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Tasks owned by the user", body = [Task]),
        (status = 404, description = "User not found, or no tasks for this user")
    ),
    security(("bearer_auth" = []))
)]
#[get("/user/{id}")]
pub async fn get_tasks_by_user(
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

    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tb_task WHERE user_id = $1 ORDER BY id",
        TASK_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(&**pool)
    .await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found for this user".into()));
    }

    Ok(HttpResponse::Ok().json(tasks))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = TaskInput,
    responses(
        (status = 200, description = "Task created"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    input: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    sqlx::query(
        "INSERT INTO tb_task (title, description, state, deadline, user_id) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.state)
    .bind(input.deadline)
    .bind(input.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Task added successfully"
    })))
}

/// Update a task
///
/// Partial update: absent fields keep their stored value. A missing target
/// answers 400 (not 404) for this entity.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    request_body = TaskUpdate,
    responses(
        (status = 200, description = "Task updated"),
        (status = 400, description = "Task not found or invalid input")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
    input: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let id = id.into_inner();

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_task WHERE id = $1")
        .bind(id)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::BadRequest(format!(
            "Task with id {} not found",
            id
        )));
    }

    sqlx::query(
        "UPDATE tb_task SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             state = COALESCE($3, state), \
             deadline = COALESCE($4, deadline), \
             user_id = COALESCE($5, user_id) \
         WHERE id = $6",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.state)
    .bind(input.deadline)
    .bind(input.user_id)
    .bind(id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Task updated successfully"
    })))
}

/// Delete a task
///
/// The database cascade removes the task's category associations; deleting
/// a task does not require the admin gate.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_task WHERE id = $1")
        .bind(id)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(format!("Task with id {} not found", id)));
    }

    sqlx::query("DELETE FROM tb_task WHERE id = $1")
        .bind(id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("Task with id {} deleted", id)
    })))
}
