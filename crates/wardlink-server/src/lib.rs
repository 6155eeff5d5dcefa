//! Wardlink server library logic.
//!
//! HTTP surface over the notification hub: one SSE endpoint per operator for
//! the long-lived notification stream, and one inbound endpoint the batch
//! runner posts completion facts to.

pub mod api_batch;
pub mod api_sse;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use wardlink_hub::NotificationHub;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The notification hub, constructed once at service start.
    pub hub: NotificationHub,
}

/// Maximum request body size (64 KiB). Completion facts are tiny; anything
/// larger is malformed.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/events/batch/{name}",
            get(api_sse::batch_stream_handler),
        )
        .route(
            "/api/batch/completed",
            post(api_batch::batch_completed_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState {
            hub: NotificationHub::new(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_returns_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn completed_without_subscriber_is_accepted_but_undelivered() {
        let response = test_app()
            .oneshot(post_json(
                "/api/batch/completed",
                json!({
                    "adminName": "alice",
                    "seqId": 1,
                    "startDate": "2024-01-01T00:00:00Z",
                    "endDate": "2024-01-01T00:05:00Z",
                    "fileName": "report-1.pdf",
                    "type": 0,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["delivered"], false);
    }

    #[tokio::test]
    async fn completed_rejects_unknown_job_type_ordinal() {
        let response = test_app()
            .oneshot(post_json(
                "/api/batch/completed",
                json!({
                    "adminName": "alice",
                    "seqId": 1,
                    "startDate": "2024-01-01T00:00:00Z",
                    "endDate": "2024-01-01T00:05:00Z",
                    "fileName": "report-1.pdf",
                    "type": 9,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn completed_rejects_blank_admin_name() {
        let response = test_app()
            .oneshot(post_json(
                "/api/batch/completed",
                json!({
                    "adminName": "   ",
                    "seqId": 1,
                    "startDate": "2024-01-01T00:00:00Z",
                    "endDate": "2024-01-01T00:05:00Z",
                    "fileName": "report-1.pdf",
                    "type": 0,
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
