use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use cattery_infra::StorageError;

/// Failures a handler can surface to the client.
///
/// "Not found" is not here: handlers map `None` to an empty 404 directly.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid cat id: {0}")]
    InvalidId(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
            ApiError::InvalidBody(msg) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_body", msg)
            }
            ApiError::Storage(err) => {
                // Driver text stays in the logs, never in the response.
                tracing::error!(error = %err, "storage fault while handling request");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "internal storage error",
                )
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
