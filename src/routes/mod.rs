pub mod categories;
pub mod docs;
pub mod health;
pub mod task_categories;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers the `/api` resource scopes. The root status endpoint and
/// `/api-docs` are registered separately in `main.rs`, outside these scopes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(users::get_users)
            .service(users::create_user)
            .service(users::login_user)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/api/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_tasks_by_user)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/api/categories")
            .service(categories::get_categories)
            .service(categories::create_category)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category),
    )
    .service(
        web::scope("/api/tasks-categories")
            .service(task_categories::get_task_categories)
            .service(task_categories::create_task_category)
            .service(task_categories::get_task_categories_by_user)
            .service(task_categories::update_task_category),
    );
}
