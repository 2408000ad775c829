//! API error mapping.
//!
//! Input errors surface as 400s with their message intact. Storage and
//! internal failures are logged server-side and collapsed to generic
//! messages; resolver degradation never reaches this layer at all, since
//! the resolver's contract is total.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_scout_lib::ScoutError;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),

    NotFound(String),

    Storage(String),

    Internal(String),
}

/// Error body shape the client expects: `{ "message": "..." }`.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Storage(msg) => write!(f, "Storage error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Storage(msg) => {
                tracing::error!("storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody { message };
        (status, Json(body)).into_response()
    }
}

impl From<ScoutError> for ApiError {
    fn from(err: ScoutError) -> Self {
        if err.is_input_error() {
            return ApiError::Validation(err.to_string());
        }
        match err {
            ScoutError::Storage { message } => ApiError::Storage(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}
