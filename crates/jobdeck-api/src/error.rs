//! Service error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Caller-facing service error conditions.
///
/// Exactly two classifications reach callers: a missing job and a generic
/// internal failure. Storage detail never crosses the service boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested job does not exist.
    #[error("Job not found: {0}")]
    JobNotFound(i64),

    /// Unclassified storage or registration failure.
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::JobNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ServiceError::JobNotFound(999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_maps_to_500_without_detail() {
        let err = ServiceError::Internal;
        assert_eq!(err.to_string(), "Internal server error");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
