use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use log::error;
use crate::store::StoreError;

/// Message sent for every 5xx; details stay in the server log.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationResponse<'a> {
    errors: &'a [String],
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(messages) => AppError::Validation(messages),
            StoreError::Duplicate(_) => AppError::Conflict("employeeCode already exists".to_string()),
            StoreError::Backend(err) => AppError::InternalServerError(format!("database error: {}", err)),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                response.json(ErrorResponse { message: msg })
            }
            AppError::Validation(messages) => response.json(ValidationResponse { errors: messages }),
            AppError::InternalServerError(_) => {
                error!("{}", self);
                response.json(ErrorResponse { message: SERVER_ERROR_MESSAGE })
            }
        }
    }
}
