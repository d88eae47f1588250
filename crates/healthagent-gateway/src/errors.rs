//! API error type mapped to HTTP status codes.
//!
//! Every variant renders as `{"error": "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use healthagent_core::error::HealthAgentError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters (400).
    #[error("{0}")]
    BadRequest(String),
    /// Session store failure (503).
    #[error("database_unavailable: {0}")]
    ServiceUnavailable(String),
    /// Unexpected server error (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HealthAgentError> for ApiError {
    fn from(e: HealthAgentError) -> Self {
        match e {
            HealthAgentError::Database(msg) => ApiError::ServiceUnavailable(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("{self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
