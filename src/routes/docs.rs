use actix_web::{get, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{LoginRequest, LoginResponse};
use crate::models::task_category::{CategoryRef, TaskRef};
use crate::models::{
    Category, CategoryInput, CategoryUpdate, Task, TaskCategory, TaskCategoryDetail,
    TaskCategoryInput, TaskCategoryUpdate, TaskInput, TaskUpdate, TaskWithUser, User, UserInput,
    UserType, UserUpdate,
};
use crate::routes::task_categories::TaskCategoryResponse;

/// Registers the bearer-token security scheme referenced by the handler
/// annotations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TaskDeck API",
        description = "Task-management REST API: users, tasks, categories and task-category associations"
    ),
    paths(
        crate::routes::health::health,
        crate::routes::users::get_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::login_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::tasks::get_tasks,
        crate::routes::tasks::get_task,
        crate::routes::tasks::get_tasks_by_user,
        crate::routes::tasks::create_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
        crate::routes::categories::get_categories,
        crate::routes::categories::get_category,
        crate::routes::categories::create_category,
        crate::routes::categories::update_category,
        crate::routes::categories::delete_category,
        crate::routes::task_categories::get_task_categories,
        crate::routes::task_categories::get_task_categories_by_user,
        crate::routes::task_categories::create_task_category,
        crate::routes::task_categories::update_task_category,
    ),
    components(schemas(
        User,
        UserInput,
        UserUpdate,
        UserType,
        LoginRequest,
        LoginResponse,
        Task,
        TaskInput,
        TaskUpdate,
        TaskWithUser,
        Category,
        CategoryInput,
        CategoryUpdate,
        TaskCategory,
        TaskCategoryInput,
        TaskCategoryUpdate,
        TaskCategoryDetail,
        TaskRef,
        CategoryRef,
        TaskCategoryResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "status", description = "API status"),
        (name = "users", description = "User accounts and login"),
        (name = "tasks", description = "Tasks"),
        (name = "categories", description = "Categories"),
        (name = "tasks-categories", description = "Task-category associations"),
    )
)]
pub struct ApiDoc;

/// Machine-readable API documentation
///
/// Serves the generated OpenAPI document as JSON; exempt from the token
/// gate.
#[get("/api-docs")]
pub async fn api_docs() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_api_docs_endpoint() {
        let app = test::init_service(actix_web::App::new().service(api_docs)).await;

        let req = test::TestRequest::get().uri("/api-docs").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["info"]["title"], "TaskDeck API");
        assert!(json["paths"]["/api/tasks"].get("get").is_some());
        assert!(json["paths"]["/api/users/login"].get("post").is_some());
        assert!(json["components"]["securitySchemes"]
            .get("bearer_auth")
            .is_some());
    }
}
