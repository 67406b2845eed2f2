// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use crate::models::UniqueField;
use crate::validation::ValidationError;
use accounts_common::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown email and wrong password are deliberately the same error
    #[error("Invalid user credentials")]
    InvalidCredentials,

    #[error("Unauthenticated: missing, malformed or revoked API token")]
    Unauthenticated,

    #[error("{0} already in use")]
    Conflict(UniqueField),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Io(_) | AppError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code carried in the response envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials | AppError::Conflict(_) => {
                "BAD_REQUEST"
            },
            AppError::Unauthenticated => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) | AppError::Io(_) | AppError::Json(_) => "INTERNAL_ERROR",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::InvalidCredentials => "Invalid user credentials".to_string(),
            AppError::Unauthenticated => "Authentication required".to_string(),
            AppError::Conflict(field) => format!("{field} already in use"),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Internal(_) | AppError::Io(_) | AppError::Json(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }

    /// Build the `{code, status, message}` envelope
    pub fn body(&self) -> ErrorBody {
        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        ErrorBody {
            code: self.error_code().to_string(),
            status: self.status_code().as_u16(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, axum::Json(self.body())).into_response()
    }
}
