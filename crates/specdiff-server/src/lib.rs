//! HTTP server for specdiff.
//!
//! A thin JSON wrapper around [`specdiff_sdk::compare_documents`]: clients
//! post two document strings and receive the diff tree, metrics, API
//! overview, and resolution warnings. Comparisons run on the blocking
//! thread pool.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{DiffRequest, HealthResponse};
pub use router::build_router;
pub use server::SpecdiffServer;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(ServerConfig::default())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_diff(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/diff")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let request = Request::builder()
            .uri("/v1/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let request = Request::builder()
            .uri("/v1/info")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, 200);
        assert_eq!(body["name"], "specdiff-server");
        assert_eq!(body["formats"], json!(["json", "yaml"]));
    }

    #[tokio::test]
    async fn diff_endpoint() {
        let request = post_diff(&json!({
            "previous": r#"{"a": 1, "b": [1, 2]}"#,
            "current": r#"{"a": 2, "b": [1, 2], "c": true}"#,
        }));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, 200);
        assert_eq!(body["display"]["key"], "root");
        assert_eq!(body["display"]["type"], "changed");
        assert_eq!(body["display"]["children"][0], json!({
            "key": "a", "path": "a", "type": "changed", "value1": 1, "value2": 2,
        }));
        assert_eq!(
            body["metrics"],
            json!({"added": 1, "removed": 0, "changed": 1, "unchanged": 2, "total": 4})
        );
        assert_eq!(body["overview"]["compatible"], true);
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn diff_yaml_with_references() {
        let previous = "paths:\n  /pets:\n    get:\n      $ref: '#/ops/list'\nops:\n  list:\n    summary: List\n";
        let current = "paths:\n  /pets:\n    get:\n      $ref: '#/ops/list'\nops:\n  list:\n    summary: List pets\n";
        let request = post_diff(&json!({
            "previous": previous,
            "current": current,
            "format": "yaml",
            "resolve_refs": true,
        }));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, 200);
        assert_eq!(
            body["overview"]["changedOperations"],
            json!([{"method": "GET", "path": "/pets", "added": 0, "removed": 0, "changed": 1}])
        );
    }

    #[tokio::test]
    async fn malformed_document_is_unprocessable() {
        let request = post_diff(&json!({"previous": "{}", "current": "{"}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("current document: failed to parse JSON document"));
    }

    #[tokio::test]
    async fn missing_field_is_rejected_with_json_error() {
        let request = post_diff(&json!({"previous": "{}"}));
        let (status, body) = send(app(), request).await;
        assert!(status.is_client_error());
        assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
    }

    #[tokio::test]
    async fn not_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/diff")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_document_is_rejected() {
        let app = router::build_router(ServerConfig {
            max_document_bytes: 8,
            ..Default::default()
        });
        let request = post_diff(&json!({"previous": "{}", "current": r#"{"aaaaaaaa": 1}"#}));
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "current document is 15 bytes, limit is 8");
    }
}
