use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all specdiff endpoints.
pub fn build_router(config: ServerConfig) -> Router {
    let body_limit = config.body_limit();
    let allow_cors = config.allow_cors;
    let state = AppState {
        config: Arc::new(config),
    };

    let router = Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/diff", post(handler::diff_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
