use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum AppError {
    // Unknown user ids are reported as 400, existing clients rely on it.
    NotFound(String),
    InternalServerError(String),
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".to_string())
    }

    fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg) | AppError::InternalServerError(msg) | AppError::BadRequest(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse { error: self.message().to_string() };
        match self {
            AppError::NotFound(_) | AppError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            AppError::InternalServerError(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}
