//! Common error types for the headshot relay

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::JobStatus;
use crate::catalog::LookupError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Generation job {id} ended with status {status}")]
    UpstreamJobFailed { id: String, status: JobStatus },

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Unrecognized output shape: {0}")]
    UnrecognizedOutputShape(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

impl AppError {
    /// HTTP status, error type and optional machine-readable code
    fn classify(&self) -> (StatusCode, &'static str, Option<&'static str>) {
        match self {
            AppError::Lookup(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", Some("unknown_selection")),
            AppError::InvalidSelection(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", Some("invalid_selection")),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", None),
            AppError::Json(_) => (StatusCode::BAD_REQUEST, "invalid_request_error", Some("invalid_json")),
            AppError::AuthenticationFailed(_) => (StatusCode::UNAUTHORIZED, "authentication_error", Some("invalid_api_key")),
            AppError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error", Some("rate_limit_exceeded")),
            AppError::UpstreamJobFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", Some("job_failed")),
            AppError::UnrecognizedOutputShape(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", Some("unrecognized_output")),
            AppError::HttpClient(_) | AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", None),
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", None),
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        self.classify().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code) = self.classify();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                r#type: error_type.to_string(),
                code: code.map(|c| c.to_string()),
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
