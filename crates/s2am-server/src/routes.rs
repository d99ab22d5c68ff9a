//! Route configuration for the relay.

use std::sync::Arc;

use axum::routing::{post, Router};
use tower_http::trace::TraceLayer;

use crate::config::WEBHOOK_PATH;
use crate::handlers::splunk_webhook;
use crate::state::RelayState;

/// Create the relay router.
pub fn create_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(splunk_webhook))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    // Nothing listens here; requests that reach the forwarder fail fast.
    const UNREACHABLE_AM: &str = "http://127.0.0.1:1";

    fn make_test_state(config: ServerConfig) -> Arc<RelayState> {
        Arc::new(RelayState::new(config).unwrap())
    }

    fn webhook_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/splunk-webhook")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let response = app.oneshot(webhook_request("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_request");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let response = app
            .oneshot(webhook_request(r#"{"search_name": "x", "result": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_still_decoded() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let request = Request::builder()
            .method("POST")
            .uri("/splunk-webhook")
            .body(Body::from("not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_ends_at_is_bad_request() {
        let config = ServerConfig::new(UNREACHABLE_AM)
            .with_transform(s2am_alerts::TransformConfig::new().with_ends_at("eventually"));
        let app = create_router(make_test_state(config));

        let response = app
            .oneshot(webhook_request(r#"{"search_name": "x", "result": {}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("eventually"));
    }

    #[tokio::test]
    async fn test_unreachable_alertmanager_is_server_error() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let response = app
            .oneshot(webhook_request(r#"{"search_name": "x", "result": {}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "forward_failed");
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let request = Request::builder()
            .uri("/splunk-webhook")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let app = create_router(make_test_state(ServerConfig::new(UNREACHABLE_AM)));

        let request = Request::builder()
            .method("POST")
            .uri("/api/v2/alerts")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
