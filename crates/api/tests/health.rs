mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;

#[tokio::test]
async fn health_reports_ok_without_device_headers() {
    let app = TestApp::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["storeHealthy"], true);
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn status_is_a_bare_liveness_check() {
    let app = TestApp::new();
    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new();
    let response = app.get("/sessions/current").await;
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn supplied_request_id_is_propagated() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/status")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers["x-request-id"], "req-123");
}
