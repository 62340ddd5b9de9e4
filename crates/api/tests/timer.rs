mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn idle_work_timer_on_first_read() {
    let app = TestApp::new();
    let response = app.get("/timer/current").await;

    assert_eq!(response.status, StatusCode::OK);
    let timer = &response.body["data"]["timer"];
    assert_eq!(timer["status"], "idle");
    assert_eq!(timer["type"], "work");
    assert_eq!(timer["remainingSeconds"], 25 * 60);
}

#[tokio::test]
async fn pause_and_resume_preserve_remaining_time() {
    let app = TestApp::new();
    let started = app.post("/timer/start", Some(json!({ "type": "work" }))).await;
    assert_eq!(started.status, StatusCode::OK);
    assert_eq!(started.body["data"]["timer"]["status"], "running");

    app.advance(Duration::minutes(10));
    let paused = app.post("/timer/pause", None).await;
    assert_eq!(paused.body["data"]["timer"]["status"], "paused");
    assert_eq!(paused.body["data"]["timer"]["remainingSeconds"], 15 * 60);

    app.advance(Duration::hours(1));
    let resumed = app.post("/timer/resume", None).await;
    assert_eq!(resumed.body["data"]["timer"]["status"], "running");
    assert_eq!(resumed.body["data"]["timer"]["remainingSeconds"], 15 * 60);

    app.advance(Duration::minutes(5));
    let current = app.get("/timer/current").await;
    assert_eq!(current.body["data"]["timer"]["remainingSeconds"], 10 * 60);
}

#[tokio::test]
async fn finished_run_is_counted() {
    let app = TestApp::new();
    app.post("/timer/start", Some(json!({ "type": "work" }))).await;
    app.advance(Duration::minutes(26));

    let current = app.get("/timer/current").await;
    assert_eq!(current.body["data"]["timer"]["status"], "completed");
    assert_eq!(current.body["data"]["timer"]["remainingSeconds"], 0);

    app.post("/timer/start", Some(json!({ "type": "short_break" }))).await;
    app.advance(Duration::minutes(5));

    let stats = app.get("/timer/stats").await;
    assert_eq!(stats.status, StatusCode::OK);
    let data = &stats.body["data"];
    assert_eq!(data["totalCompleted"], 2);
    assert_eq!(data["totalWorkSessions"], 1);
    assert_eq!(data["totalShortBreaks"], 1);
    assert_eq!(data["totalLongBreaks"], 0);
    assert_eq!(data["totalTimeSeconds"], 25 * 60);
    assert_eq!(data["todayCount"], 2);
}

#[tokio::test]
async fn durations_follow_settings() {
    let app = TestApp::new();
    app.put("/settings", json!({ "longBreakMinutes": 20 })).await;

    let started = app
        .post("/timer/start", Some(json!({ "type": "long_break" })))
        .await;
    assert_eq!(started.body["data"]["timer"]["durationSeconds"], 20 * 60);
}

#[tokio::test]
async fn invalid_transitions_are_rejected() {
    let app = TestApp::new();
    let pause = app.post("/timer/pause", None).await;
    assert_eq!(pause.status, StatusCode::BAD_REQUEST);
    assert_eq!(pause.body["error"], "INVALID_ACTION");

    let resume = app.post("/timer/resume", None).await;
    assert_eq!(resume.status, StatusCode::BAD_REQUEST);
    assert_eq!(resume.body["error"], "INVALID_ACTION");
}

#[tokio::test]
async fn reset_returns_to_idle() {
    let app = TestApp::new();
    app.post("/timer/start", Some(json!({ "type": "work" }))).await;
    app.advance(Duration::minutes(3));

    let reset = app.post("/timer/reset", None).await;
    assert_eq!(reset.body["data"]["timer"]["status"], "idle");
    assert_eq!(reset.body["data"]["timer"]["remainingSeconds"], 25 * 60);
}

#[tokio::test]
async fn unknown_timer_type_is_a_validation_failure() {
    let app = TestApp::new();
    let response = app.post("/timer/start", Some(json!({ "type": "nap" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_FAILED");
}
