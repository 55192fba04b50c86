//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Guard failures and not-found
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Infrastructure failures
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            AppError::Domain(domain_err) => {
                let status = if domain_err.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if domain_err.is_invalid_input() {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::CONFLICT
                };
                (status, domain_err.code(), None)
            }

            AppError::Store(store_err) => match store_err {
                StoreError::ConcurrencyConflict { .. } | StoreError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, "store_conflict", Some(store_err.to_string()))
                }
                StoreError::MaxRetriesExceeded => {
                    tracing::warn!("Transition retries exhausted");
                    (StatusCode::SERVICE_UNAVAILABLE, "retries_exhausted", None)
                }
                StoreError::NotFound(email) => {
                    (StatusCode::NOT_FOUND, "helper_not_found", Some(email.clone()))
                }
                StoreError::Database(e) => {
                    tracing::error!("Database error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
                }
                StoreError::InvalidRecord(msg) => {
                    tracing::error!("Invalid stored record: {}", msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, "invalid_record", None)
                }
            },

            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        // Infrastructure messages can leak internals; domain ones are user-facing.
        let error = match &self {
            AppError::Store(StoreError::Database(_)) | AppError::Config(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_failure_maps_to_conflict() {
        let response = AppError::from(DomainError::AlreadyUnderReview).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::from(DomainError::helper_not_found("a@x.com")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_reason_maps_to_422() {
        let response = AppError::from(DomainError::MissingReason).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_failure_is_not_a_guard_failure() {
        let err = AppError::from(StoreError::MaxRetriesExceeded);
        assert!(!matches!(err, AppError::Domain(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
