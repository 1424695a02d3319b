//! Unified Error Handling
//!
//! Application-wide error type and its HTTP mapping.
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | Request/business errors | E0003 not found |
//! | E3xxx  | Tenant scoping errors   | E3001 missing restaurant |
//! | E9xxx  | System errors           | E9002 database |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Tenant scoping (4xx) ==========
    #[error("Restaurant scope required")]
    Unauthorized,

    // ========== Business logic (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== System (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Generation provider error: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        AppError::Provider(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Restaurant scope required".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Provider(msg) => {
                error!(target: "ai", error = %msg, "Generation provider error");
                (
                    StatusCode::BAD_GATEWAY,
                    "E9003",
                    "Generation provider error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(code, message));
        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
