mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;

/// Bring the app to the point right after one harm action.
async fn after_harm(app: &TestApp) -> serde_json::Value {
    app.get("/sessions/current").await;
    app.advance(Duration::minutes(61));
    let harm = app.post("/actions/harm", None).await;
    assert_eq!(harm.status, StatusCode::CREATED);
    harm.body["data"]["action"].clone()
}

#[tokio::test]
async fn nothing_pending_for_new_device() {
    let app = TestApp::new();
    let response = app.get("/actions/follow-up/pending").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["hasPending"], false);
    assert!(response.body["data"]["question"].is_null());
}

#[tokio::test]
async fn harm_creates_pending_question_until_answered() {
    let app = TestApp::new();
    let harm = after_harm(&app).await;

    let pending = app.get("/actions/follow-up/pending").await;
    assert_eq!(pending.body["data"]["hasPending"], true);
    assert_eq!(pending.body["data"]["question"]["id"], harm["id"]);
    assert!(pending.body["data"]["question"]["text"].is_string());

    let submitted = app
        .post("/actions/follow-up", Some(json!({ "answer": "Work stress" })))
        .await;
    assert_eq!(submitted.status, StatusCode::CREATED);
    let follow_up = &submitted.body["data"]["followUp"];
    assert_eq!(follow_up["answer"], "Work stress");
    assert_eq!(follow_up["question"], pending.body["data"]["question"]["text"]);

    let cleared = app.get("/actions/follow-up/pending").await;
    assert_eq!(cleared.body["data"]["hasPending"], false);
}

#[tokio::test]
async fn answering_twice_fails() {
    let app = TestApp::new();
    after_harm(&app).await;

    let first = app
        .post("/actions/follow-up", Some(json!({ "answer": "boredom" })))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post("/actions/follow-up", Some(json!({ "answer": "again" })))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "NO_PENDING_FOLLOWUP");
}

#[tokio::test]
async fn answer_without_harm_fails() {
    let app = TestApp::new();
    let response = app
        .post("/actions/follow-up", Some(json!({ "answer": "nothing happened" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "NO_PENDING_FOLLOWUP");
}

#[tokio::test]
async fn empty_answer_is_a_validation_failure() {
    let app = TestApp::new();
    after_harm(&app).await;

    let response = app
        .post("/actions/follow-up", Some(json!({ "answer": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_FAILED");
    assert_eq!(response.body["issues"][0]["field"], "answer");

    let pending = app.get("/actions/follow-up/pending").await;
    assert_eq!(pending.body["data"]["hasPending"], true);
}
