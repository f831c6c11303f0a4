//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses `{"error", "message"}` with
//! the matching status code. Server-side failures keep the underlying
//! message text and are logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::password::PasswordError;
use crate::storage::StorageError;

/// Message returned for any failed login
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Unique key already taken (400)
    Conflict { message: String },

    /// Unknown email or wrong password (400)
    InvalidCredentials,

    /// Resource not found (404)
    NotFound { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Upload could not be written (500, logged)
    Storage(StorageError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// 404 for an empty listing, e.g. `ApiError::none_found("services")`.
    pub fn none_found(what: &str) -> Self {
        Self::NotFound {
            message: format!("No {} found.", what),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Storage(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            Self::Validation(e) => ("validation_error", e.to_string()),
            Self::Conflict { message } => ("conflict", message),
            Self::InvalidCredentials => ("invalid_credentials", INVALID_CREDENTIALS.to_owned()),
            Self::NotFound { message } => ("not_found", message),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("internal_error", format!("Error: {}", e))
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                ("internal_error", format!("Error: {}", e))
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                ("internal_error", format!("Error: {}", message))
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound {
                message: format!("{} '{}' not found", resource, id),
            },
            DbError::Conflict { detail, .. } => Self::Conflict { message: detail },
            DbError::EmptyUpdate => Self::Validation(ValidationError::NoFieldsToUpdate),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidFilename(_) => Self::Validation(ValidationError::InvalidFormat {
                field: "filename",
                reason: "uploaded file needs a usable filename",
            }),
            StorageError::Io(_) => Self::Storage(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}
