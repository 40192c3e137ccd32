use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the retrieval-augmentation pipeline.
///
/// Every failure path resolves to exactly one of these kinds. The payload
/// carries upstream detail for logging; it is never echoed to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("embedding failed: {0}")]
    Embedding(String),
    #[error("retrieval failed: {0}")]
    Retrieval(String),
    #[error("completion failed: {0}")]
    Completion(String),
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),
}

impl ApiError {
    pub fn embedding<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Embedding(err.to_string())
    }

    pub fn retrieval<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Retrieval(err.to_string())
    }

    pub fn completion<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Completion(err.to_string())
    }

    pub fn interrupted<E: std::fmt::Display>(err: E) -> Self {
        ApiError::StreamInterrupted(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Upstream detail stays in the logs; the client gets a fixed body.
        tracing::error!(error = %self, "request failed");

        let (status, message) = match &self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid request"),
            ApiError::Embedding(_)
            | ApiError::Retrieval(_)
            | ApiError::Completion(_)
            | ApiError::StreamInterrupted(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
