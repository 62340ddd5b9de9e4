mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn defaults_are_returned_on_first_read() {
    let app = TestApp::new();
    let response = app.get("/settings").await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["lockdownMinutes"], 60);
    assert_eq!(data["workMinutes"], 25);
    assert_eq!(data["shortBreakMinutes"], 5);
    assert_eq!(data["longBreakMinutes"], 15);
    assert!(data["updatedAt"].is_string());
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = TestApp::new();
    let response = app.put("/settings", json!({ "workMinutes": 50 })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["workMinutes"], 50);
    assert_eq!(response.body["data"]["lockdownMinutes"], 60);

    let read = app.get("/settings").await;
    assert_eq!(read.body["data"]["workMinutes"], 50);
}

#[tokio::test]
async fn lockdown_bounds_are_inclusive() {
    let app = TestApp::new();
    for ok in [1, 10_080] {
        let response = app.put("/settings", json!({ "lockdownMinutes": ok })).await;
        assert_eq!(response.status, StatusCode::OK, "{ok}");
        assert_eq!(response.body["data"]["lockdownMinutes"], ok);
    }
    for bad in [0, -5, 10_081] {
        let response = app.put("/settings", json!({ "lockdownMinutes": bad })).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{bad}");
        assert_eq!(response.body["error"], "VALIDATION_FAILED");
        assert_eq!(response.body["issues"][0]["field"], "lockdownMinutes");
    }

    let read = app.get("/settings").await;
    assert_eq!(read.body["data"]["lockdownMinutes"], 10_080);
}

#[tokio::test]
async fn rejected_update_writes_nothing() {
    let app = TestApp::new();
    let response = app
        .put("/settings", json!({ "workMinutes": 30, "longBreakMinutes": 500 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let read = app.get("/settings").await;
    assert_eq!(read.body["data"]["workMinutes"], 25);
}

#[tokio::test]
async fn unknown_and_wrongly_typed_fields_are_rejected() {
    let app = TestApp::new();
    let unknown = app.put("/settings", json!({ "lockdown_minutes": 30 })).await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body["error"], "VALIDATION_FAILED");

    let wrong_type = app.put("/settings", json!({ "lockdownMinutes": "thirty" })).await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_type.body["error"], "VALIDATION_FAILED");
}
