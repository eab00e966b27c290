use crate::{
    error::AppError,
    models::{Category, CategoryInput, CategoryUpdate},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "All categories", body = [Category])),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_categories(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, description FROM tb_category ORDER BY id")
            .fetch_all(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/{id}")]
pub async fn get_category(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();
    let category =
        sqlx::query_as::<_, Category>("SELECT id, description FROM tb_category WHERE id = $1")
            .bind(id)
            .fetch_optional(&**pool)
            .await?;

    match category {
        Some(category) => Ok(HttpResponse::Ok().json(category)),
        None => Err(AppError::NotFound(format!(
            "Category with id {} not found",
            id
        ))),
    }
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category created"),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_category(
    pool: web::Data<PgPool>,
    input: web::Json<CategoryInput>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    sqlx::query("INSERT INTO tb_category (description) VALUES ($1)")
        .bind(&input.description)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Category added successfully"
    })))
}

/// Update a category
///
/// A missing target answers 400 (not 404) for this entity.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryUpdate,
    responses(
        (status = 200, description = "Category updated"),
        (status = 400, description = "Category not found or invalid input")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_category(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
    input: web::Json<CategoryUpdate>,
) -> Result<impl Responder, AppError> {
    input.validate()?;
    let id = id.into_inner();

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_category WHERE id = $1")
        .bind(id)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::BadRequest(format!(
            "Category with id {} not found",
            id
        )));
    }

    sqlx::query("UPDATE tb_category SET description = COALESCE($1, description) WHERE id = $2")
        .bind(&input.description)
        .bind(id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Category updated successfully"
    })))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_category(
    pool: web::Data<PgPool>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();

    let existing = sqlx::query_as::<_, (i32,)>("SELECT id FROM tb_category WHERE id = $1")
        .bind(id)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::NotFound(format!(
            "Category with id {} not found",
            id
        )));
    }

    sqlx::query("DELETE FROM tb_category WHERE id = $1")
        .bind(id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": format!("Category with id {} deleted", id)
    })))
}
