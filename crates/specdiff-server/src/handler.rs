use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use specdiff_sdk::{compare_documents, Comparison, Format, Side};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Body of `POST /v1/diff`.
#[derive(Clone, Debug, Deserialize)]
pub struct DiffRequest {
    pub previous: String,
    pub current: String,
    #[serde(default)]
    pub format: Format,
    /// Overrides the server's default when present.
    #[serde(default)]
    pub resolve_refs: Option<bool>,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "specdiff-server",
        "version": env!("CARGO_PKG_VERSION"),
        "formats": ["json", "yaml"],
        "max_document_bytes": state.config.max_document_bytes,
        "resolve_refs": state.config.compare.resolve_refs,
    }))
}

/// Compare two documents.
pub async fn diff_handler(
    State(state): State<AppState>,
    payload: Result<Json<DiffRequest>, JsonRejection>,
) -> ServerResult<Json<Comparison>> {
    let Json(request) = payload?;

    let limit = state.config.max_document_bytes;
    for (side, doc) in [(Side::Previous, &request.previous), (Side::Current, &request.current)] {
        if doc.len() > limit {
            return Err(ServerError::DocumentTooLarge {
                side,
                size: doc.len(),
                limit,
            });
        }
    }

    let mut config = state.config.compare.clone();
    if let Some(resolve_refs) = request.resolve_refs {
        config.resolve_refs = resolve_refs;
    }

    let format = request.format;
    let comparison = tokio::task::spawn_blocking(move || {
        compare_documents(&request.previous, &request.current, format, &config)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    info!(
        %format,
        metrics = %comparison.metrics,
        compatible = comparison.overview.compatible,
        "diff served"
    );
    Ok(Json(comparison))
}
