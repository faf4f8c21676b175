//! Error handling module for the league admin backend.
//!
//! Every failure is caught at the operation boundary and turned into a
//! user-visible notice carried in the error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const WRITE_FAILED: &str = "WRITE_FAILED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Authentication required
    #[error("{0}")]
    Unauthorized(String),
    /// Caller is known but lacks the required role or store permission
    #[error("{0}")]
    Forbidden(String),
    /// Resource not found
    #[error("{0}")]
    NotFound(String),
    /// Validation error (duplicate email, missing foreign key, out of range)
    #[error("{0}")]
    Validation(String),
    /// A read against the store failed
    #[error("{message}")]
    Fetch {
        message: String,
        details: Option<serde_json::Value>,
    },
    /// A create, update or delete was rejected by the store
    #[error("{0}")]
    Write(String),
    /// Internal server error
    #[error("{0}")]
    Internal(String),
    /// Bad request
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// Convert a failed read into a notice, logging the underlying cause.
    pub fn fetch_failed(notice: &str, err: StoreError) -> Self {
        tracing::error!("{}: {}", notice, err);
        match err {
            StoreError::PermissionDenied(_) => AppError::Forbidden(notice.to_string()),
            _ => AppError::Fetch {
                message: notice.to_string(),
                details: None,
            },
        }
    }

    /// Convert a rejected write into a notice, logging the underlying cause.
    pub fn write_failed(notice: &str, err: StoreError) -> Self {
        tracing::error!("{}: {}", notice, err);
        match err {
            StoreError::NotFound(_) => AppError::NotFound(notice.to_string()),
            StoreError::PermissionDenied(_) => AppError::Forbidden(notice.to_string()),
            _ => AppError::Write(notice.to_string()),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Write(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Fetch { .. } => codes::FETCH_FAILED,
            AppError::Write(_) => codes::WRITE_FAILED,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Fetch { details, .. } => details.clone(),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
