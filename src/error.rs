//! Error types for the authorization gate.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.
//! Decision service internals never reach the client; callers see only a
//! coarse status distinguishing "not authorized" from "system problem".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::decision::DecisionError;

/// Body returned on a negative verdict.
pub const ACCESS_DENIED_BODY: &str = "Access Denied";

/// Opaque body returned when no verdict could be obtained.
pub const DECISION_ERROR_BODY: &str = "Error checking authorization";

/// Unified error type for gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// The decision service returned a well-formed negative verdict.
    #[error("access denied by policy")]
    Denied,

    /// No verdict could be obtained; fail-closed.
    #[error("decision service failure: {0}")]
    Decision(#[from] DecisionError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        match self {
            GateError::Denied => (StatusCode::FORBIDDEN, ACCESS_DENIED_BODY).into_response(),
            // Detail has already been logged where the failure was observed;
            // the client gets an opaque diagnostic.
            GateError::Decision(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, DECISION_ERROR_BODY).into_response()
            }
            GateError::Config(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, DECISION_ERROR_BODY).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_maps_to_403_with_fixed_body() {
        let response = GateError::Denied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], ACCESS_DENIED_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_decision_failure_is_opaque_500() {
        let err = GateError::Decision(DecisionError::UpstreamStatus {
            status: 404,
            body: "secret upstream diagnostics".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(body, DECISION_ERROR_BODY);
        assert!(!body.contains("secret"));
    }
}
