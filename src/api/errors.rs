//! API Error Handling
//!
//! Structured error responses with proper HTTP status codes and request tracking.

use crate::contest::ContestError;
use crate::errors::PoolError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level API error response with request tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

/// Error body with structured information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (NOT_FOUND, BAD_REQUEST, CONFLICT, etc.)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API error types with request tracking
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub request_id: String,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    InternalError(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn not_found(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::NotFound(message), request_id }
    }

    pub fn bad_request(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::BadRequest(message), request_id }
    }

    pub fn conflict(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::Conflict(message), request_id }
    }

    pub fn unauthorized(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::Unauthorized(message), request_id }
    }

    pub fn internal_error(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::InternalError(message), request_id }
    }

    pub fn service_unavailable(request_id: String, message: String) -> Self {
        Self { kind: ApiErrorKind::ServiceUnavailable(message), request_id }
    }

    /// Map a contest rule violation onto the right client-error status.
    pub fn from_contest(request_id: String, err: ContestError) -> Self {
        match err {
            ContestError::PlayerNotFound { .. }
            | ContestError::DayNotFound { .. }
            | ContestError::GameNotFound { .. } => Self::not_found(request_id, err.to_string()),
            ContestError::DayAlreadyProcessed { .. } => Self::conflict(request_id, err.to_string()),
            _ => Self::bad_request(request_id, err.to_string()),
        }
    }

    /// Contest errors stay client errors; storage and configuration
    /// failures surface as internal errors.
    pub fn from_pool(request_id: String, err: PoolError) -> Self {
        match err {
            PoolError::Contest(e) => Self::from_contest(request_id, e),
            other => Self::internal_error(request_id, other.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ApiErrorKind::NotFound(msg) => write!(f, "[{}] Not Found: {}", self.request_id, msg),
            ApiErrorKind::BadRequest(msg) => {
                write!(f, "[{}] Bad Request: {}", self.request_id, msg)
            }
            ApiErrorKind::Conflict(msg) => write!(f, "[{}] Conflict: {}", self.request_id, msg),
            ApiErrorKind::Unauthorized(msg) => {
                write!(f, "[{}] Unauthorized: {}", self.request_id, msg)
            }
            ApiErrorKind::InternalError(msg) => {
                write!(f, "[{}] Internal Error: {}", self.request_id, msg)
            }
            ApiErrorKind::ServiceUnavailable(msg) => {
                write!(f, "[{}] Service Unavailable: {}", self.request_id, msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.kind {
            ApiErrorKind::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiErrorKind::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiErrorKind::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            ApiErrorKind::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            ApiErrorKind::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
            ApiErrorKind::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            request_id: self.request_id.clone(),
            error: ErrorBody { code: code.to_string(), message },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contest_error_status_mapping() {
        let err = ApiError::from_contest(
            "req-1".to_string(),
            ContestError::PlayerNotFound { id: 9 },
        );
        assert!(matches!(err.kind, ApiErrorKind::NotFound(_)));

        let err = ApiError::from_contest(
            "req-2".to_string(),
            ContestError::DayAlreadyProcessed { day: "round1-thursday".to_string() },
        );
        assert!(matches!(err.kind, ApiErrorKind::Conflict(_)));

        let err = ApiError::from_contest("req-3".to_string(), ContestError::BuybackLimitReached);
        assert!(matches!(err.kind, ApiErrorKind::BadRequest(_)));
    }
}
