//! Shape of the error envelope across guards, validation and routing.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn unknown_route_is_enveloped_404() {
    let app = TestApp::new();
    let response = app.get("/nope").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.body["statusCode"], 404);
    assert_eq!(response.body["path"], "/nope");
}

#[tokio::test]
async fn envelope_carries_request_path_and_timestamp() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/actions/cheat")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.body["statusCode"], 401);
    assert_eq!(response.body["path"], "/actions/cheat");
    let ts = response.body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    assert!(response.body.get("issues").is_none());
}

#[tokio::test]
async fn invalid_device_id_is_unauthorized() {
    let app = TestApp::new();
    for bad in ["", "not-a-uuid", "6f1c2c1e7c2b4c1a9c1e2f3a4b5c6d7e"] {
        let request = Request::builder()
            .uri("/settings")
            .header("x-device-id", bad)
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "device id {bad:?}");
    }
}

#[tokio::test]
async fn malformed_json_is_validation_failure() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/settings")
        .header("x-device-id", app.device.to_string())
        .header("x-client-time", app.now().to_rfc3339())
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_FAILED");
    assert_eq!(response.body["path"], "/settings");
}

#[tokio::test]
async fn validation_failure_lists_issues() {
    let app = TestApp::new();
    let response = app
        .put("/settings", json!({ "lockdownMinutes": 0, "workMinutes": 500 }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_FAILED");
    let issues = response.body["issues"].as_array().unwrap();
    let fields: Vec<&str> = issues.iter().map(|i| i["field"].as_str().unwrap()).collect();
    assert_eq!(fields, ["lockdownMinutes", "workMinutes"]);
}
