// ABOUTME: Centralized error handling for the catalog API with logging at the HTTP boundary
// ABOUTME: Maps failures to status codes and {"msg": ...} bodies without leaking database details

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Duplicate(String),
    UserCreation(DbErr),
    Database(DbErr),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            AppError::UserCreation(err) => write!(f, "User creation failed: {}", err),
            AppError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UserCreation(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                msg.as_str()
            }
            AppError::NotFound(msg) => {
                tracing::info!("Resource not found: {}", msg);
                msg.as_str()
            }
            AppError::Duplicate(msg) => {
                tracing::warn!("Duplicate favorite: {}", msg);
                msg.as_str()
            }
            AppError::UserCreation(err) => {
                if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
                    tracing::warn!("User email already registered: {}", detail);
                } else {
                    tracing::error!("{}", self);
                }
                "Error creating user (possible duplicate email)"
            }
            AppError::Database(_) => {
                tracing::error!("{}", self);
                "Database operation failed"
            }
        };

        (self.status(), Json(json!({ "msg": message }))).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
