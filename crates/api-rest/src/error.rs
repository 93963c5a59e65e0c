//! HTTP error handling and conversion.
//!
//! The single place where service outcomes become status codes:
//! `NotFound` → 404, bad input of any kind → 400, store failures → 503.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brewery_application::ApplicationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Malformed path parameter
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Malformed or undecodable request body
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Internal server error
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::InvalidPath(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error body returned with every 4xx and 5xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                Self::Internal(detail) => error!(detail = %detail, "Internal error"),
                other => error!(error = %other, "Request failed"),
            }
        }

        let body = ErrorResponse::new(self.error_code(), self.to_string());

        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_errors_keep_their_status() {
        let not_found = ApiError::from(ApplicationError::beer_not_found("abc"));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.error_code(), "NOT_FOUND");

        let unmappable = ApiError::from(ApplicationError::UnmappableEnum {
            field: "beerStyle".to_string(),
            value: "SOUR".to_string(),
        });
        assert_eq!(unmappable.status_code(), StatusCode::BAD_REQUEST);

        let storage = ApiError::from(ApplicationError::StorageUnavailable("down".to_string()));
        assert_eq!(storage.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_malformed_input_is_bad_request() {
        assert_eq!(
            ApiError::InvalidPath("not a uuid".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidBody("EOF".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = ApiError::Internal("pool exhausted at 10.0.0.3".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
