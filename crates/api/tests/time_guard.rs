//! `X-Client-Time` admission across guarded and unguarded routes.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Duration;
use common::TestApp;
use monitabits_core::store::LockdownStore;
use serde_json::json;

const GUARDED: &[(&str, &str)] = &[
    ("GET", "/sessions/current"),
    ("POST", "/sessions/check-in"),
    ("POST", "/sessions/check-out"),
    ("POST", "/actions/cheat"),
    ("POST", "/actions/harm"),
    ("POST", "/actions/follow-up"),
    ("PUT", "/settings"),
    ("GET", "/stats/now"),
    ("GET", "/stats/summary"),
    ("GET", "/stats/details?startDate=2025-06-01&endDate=2025-06-02"),
];

fn body_for(uri: &str) -> Option<serde_json::Value> {
    match uri {
        "/actions/follow-up" => Some(json!({ "answer": "stress" })),
        "/settings" => Some(json!({ "lockdownMinutes": 30 })),
        _ => None,
    }
}

#[tokio::test]
async fn skewed_client_clock_is_rejected_without_side_effects() {
    let app = TestApp::new();
    let skewed = app.now() + Duration::minutes(10);

    for (method, uri) in GUARDED {
        let method: Method = method.parse().unwrap();
        let request = app.request_at(method, uri, body_for(uri), skewed);
        let response = app.send(request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.body["error"], "TIME_VALIDATION_FAILED", "{uri}");
    }

    assert!(app.store.list_sessions(app.device).await.unwrap().is_empty());
    assert!(app.store.list_actions(app.device).await.unwrap().is_empty());
    assert!(app.store.list_check_ins(app.device).await.unwrap().is_empty());
    assert!(app.store.find_settings(app.device).await.unwrap().is_none());
}

#[tokio::test]
async fn lagging_client_clock_is_rejected() {
    let app = TestApp::new();
    let lagging = app.now() - Duration::minutes(6);
    let response = app
        .send(app.request_at(Method::GET, "/sessions/current", None, lagging))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TIME_VALIDATION_FAILED");
}

#[tokio::test]
async fn skew_of_exactly_five_minutes_is_accepted() {
    let app = TestApp::new();
    let edge = app.now() + Duration::minutes(5);
    let response = app
        .send(app.request_at(Method::GET, "/sessions/current", None, edge))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn missing_or_garbled_client_time_is_rejected() {
    let app = TestApp::new();

    let missing = Request::builder()
        .uri("/sessions/current")
        .header("x-device-id", app.device.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.send(missing).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TIME_VALIDATION_FAILED");

    let garbled = Request::builder()
        .uri("/sessions/current")
        .header("x-device-id", app.device.to_string())
        .header("x-client-time", "yesterday")
        .body(Body::empty())
        .unwrap();
    let response = app.send(garbled).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TIME_VALIDATION_FAILED");
}

#[tokio::test]
async fn client_time_without_offset_is_rejected() {
    let app = TestApp::new();
    let local = app.now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string();
    let request = Request::builder()
        .uri("/sessions/current")
        .header("x-device-id", app.device.to_string())
        .header("x-client-time", local)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TIME_VALIDATION_FAILED");
    assert!(app.store.list_sessions(app.device).await.unwrap().is_empty());
}

#[tokio::test]
async fn device_only_routes_ignore_client_clock() {
    let app = TestApp::new();
    let skewed = app.now() + Duration::hours(3);

    for uri in ["/settings", "/actions/follow-up/pending", "/timer/current"] {
        let response = app
            .send(app.request_at(Method::GET, uri, None, skewed))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn device_check_runs_before_time_check() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/sessions/current")
        .header("x-client-time", "yesterday")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
