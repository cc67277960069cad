//! Error Types
//!
//! Error types for every layer, with HTTP status code mapping for the mock backend.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors representing broken model rules
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Id space exhausted after {0}")]
    IdOverflow(u64),
}

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed todo store: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    pub(crate) fn todo_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource: "Todo".to_string(),
            id: id.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::Repository(RepositoryError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } | Self::Repository(RepositoryError::NotFound(_)) => "NOT_FOUND",
            Self::Repository(_) => "INTERNAL_ERROR",
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid todo id: {0}")]
    InvalidId(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(
                        errors
                            .iter()
                            .map(|e| {
                                let (field, message) = e.split_once(": ").unwrap_or(("", e));
                                FieldError {
                                    field: field.to_string(),
                                    message: message.to_string(),
                                }
                            })
                            .collect(),
                    )
                } else {
                    None
                };
                if uc_error.status_code().is_server_error() {
                    tracing::error!(error = %uc_error, "Request failed");
                }
                (
                    uc_error.status_code(),
                    uc_error.error_code().to_string(),
                    uc_error.to_string(),
                    details,
                )
            }
            ApiError::InvalidId(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_ID".to_string(),
                format!("Invalid todo id: {msg}"),
                None,
            ),
            ApiError::InvalidQuery(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_QUERY".to_string(),
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}

/// Errors raised by the HTTP todo client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = UseCaseError::todo_not_found(7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Todo with id '7' not found");
    }

    #[test]
    fn test_repository_failure_maps_to_500() {
        let err = UseCaseError::from(RepositoryError::Io(std::io::Error::other("disk full")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let err = UseCaseError::from(RepositoryError::from(DomainError::IdOverflow(u64::MAX)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_invalid_id_response_is_bad_request() {
        let response = ApiError::InvalidId("abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
