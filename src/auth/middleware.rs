use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Bearer-token gate applied to the whole application.
///
/// Requests whose `Authorization` header is absent or does not carry the
/// `Bearer ` prefix are rejected with `401 {"msg":"Access denied!"}`;
/// requests whose token fails signature or expiry verification are rejected
/// with `401 {"msg":"Invalid token"}`. Successful requests pass through
/// unchanged; decoded claims are not attached for downstream handlers.
pub struct AuthMiddleware {
    secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(secret: String) -> Self {
        Self {
            secret: Rc::new(secret),
        }
    }
}

/// Paths that do not require a token: the root status endpoint, the API
/// documentation, user registration, and login.
fn is_exempt(method: &Method, path: &str) -> bool {
    path == "/"
        || path.starts_with("/api-docs")
        || (*method == Method::POST && path == "/api/users")
        || (*method == Method::POST && path == "/api/users/login")
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_exempt(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let bearer_token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer_token {
            Some(token) => match verify_token(token, &self.secret) {
                Ok(_claims) => {
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(verify_err) => {
                    log::debug!("Token rejected: {}", verify_err);
                    let app_err = AppError::Unauthorized("Invalid token".into());
                    Box::pin(async move { Err(app_err.into()) })
                }
            },
            None => {
                let app_err = AppError::Unauthorized("Access denied!".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::generate_token;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    const TEST_SECRET: &str = "middleware_test_secret";

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({"msg": "through"}))
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(AuthMiddleware::new(TEST_SECRET.to_string()))
            .route("/", web::get().to(protected))
            .route("/api/users", web::get().to(protected))
            .route("/api/users", web::post().to(protected))
            .route("/api/users/login", web::post().to(protected))
            .route("/api/users/login", web::get().to(protected))
            .route("/api/tasks", web::get().to(protected))
    }

    #[actix_rt::test]
    async fn test_missing_header_is_access_denied() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get().uri("/api/tasks").to_request();
        let resp = test::try_call_service(&app, req).await;

        let err = resp.expect_err("request without token should be rejected");
        let response = HttpResponse::from_error(err);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Access denied!");
    }

    #[actix_rt::test]
    async fn test_non_bearer_header_is_access_denied() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .append_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("non-bearer auth should be rejected");
        let response = HttpResponse::from_error(err);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Access denied!");
    }

    #[actix_rt::test]
    async fn test_bad_token_is_invalid_token() {
        let app = test::init_service(test_app()).await;
        let other = generate_token("x@example.com", "some_other_secret").unwrap();
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .append_header(("Authorization", format!("Bearer {}", other)))
            .to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("token with wrong signature should be rejected");
        let response = HttpResponse::from_error(err);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["msg"], "Invalid token");
    }

    #[actix_rt::test]
    async fn test_valid_token_passes() {
        let app = test::init_service(test_app()).await;
        let token = generate_token("x@example.com", TEST_SECRET).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .append_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_exempt_paths_pass_without_token() {
        let app = test::init_service(test_app()).await;

        for (method, uri) in [
            ("GET", "/"),
            ("POST", "/api/users"),
            ("POST", "/api/users/login"),
        ] {
            let req = match method {
                "GET" => test::TestRequest::get().uri(uri).to_request(),
                _ => test::TestRequest::post().uri(uri).to_request(),
            };
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{} {} should be exempt", method, uri);
        }

        // Listing users is not exempt even though registration on the same
        // path is.
        let req = test::TestRequest::get().uri("/api/users").to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("GET /api/users should require a token");
        assert_eq!(HttpResponse::from_error(err).status(), StatusCode::UNAUTHORIZED);

        // Only POST is exempt on the login path.
        let req = test::TestRequest::get().uri("/api/users/login").to_request();
        let err = test::try_call_service(&app, req)
            .await
            .expect_err("GET /api/users/login should require a token");
        assert_eq!(HttpResponse::from_error(err).status(), StatusCode::UNAUTHORIZED);
    }
}
