//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management so that every handler can
//! propagate failures with `?` and still produce a consistent JSON body of
//! the form `{"msg": ...}`.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses. `From` implementations are
//! provided for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`.
//!
//! Database and other internal faults are logged server-side and surfaced to
//! the client as a generic `{"msg": "Server error"}` body; the underlying
//! cause is never included in the response.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure: missing or invalid token (HTTP 401).
    Unauthorized(String),
    /// Authorization failure: valid request but insufficient privileges (HTTP 403).
    Forbidden(String),
    /// Malformed or invalid request, including missing update targets where
    /// the contract specifies 400 (HTTP 400).
    BadRequest(String),
    /// A requested resource does not exist (HTTP 404).
    NotFound(String),
    /// An unexpected server-side fault (HTTP 500). The message is logged,
    /// not returned.
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500). Wraps
    /// errors from `sqlx`; the detail is logged, not returned.
    DatabaseError(String),
    /// Failed input validation from the `validator` crate (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "msg": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "msg": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "msg": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "msg": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "msg": msg
            })),
            // Internal detail stays on the server; the client sees a generic
            // message only.
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                log::error!("{}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "msg": "Server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; anything else
/// becomes `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
