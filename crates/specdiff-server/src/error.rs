use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use specdiff_sdk::{CompareError, Side};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{side} document is {size} bytes, limit is {limit}")]
    DocumentTooLarge { side: Side, size: usize, limit: usize },

    #[error("invalid request body: {0}")]
    Rejected(#[from] JsonRejection),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::DocumentTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Rejected(rejection) => rejection.status(),
            ServerError::Compare(CompareError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Compare(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Config(_) | ServerError::Io(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
