use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Root status endpoint
///
/// Static JSON confirming the API is up; exempt from the token gate.
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "API status message"))
)]
#[get("/")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "msg": "API WORKING"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(actix_web::App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["msg"], "API WORKING");
    }
}
