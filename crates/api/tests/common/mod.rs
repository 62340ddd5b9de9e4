#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, SecondsFormat, TimeZone, Utc};
use http_body_util::BodyExt;
use monitabits_api::config::ServerConfig;
use monitabits_api::router::build_app_router;
use monitabits_api::state::AppState;
use monitabits_core::clock::{Clock, ManualClock};
use monitabits_core::device::{CLIENT_TIME_HEADER, DEVICE_ID_HEADER};
use monitabits_core::store::MemoryStore;
use monitabits_core::types::Timestamp;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        ..ServerConfig::default()
    }
}

/// Fixed start instant so day-bucketed assertions are deterministic.
pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Status, headers and parsed JSON body of one response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// The full router over an in-memory store and a manual clock, plus one
/// device id to send requests as.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryStore>,
    pub device: Uuid,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(t0()));
        let store = Arc::new(MemoryStore::new());
        let config = test_config();

        let state = AppState {
            store: store.clone(),
            clock: clock.clone(),
            config: Arc::new(config.clone()),
        };
        let router = build_app_router(state, &config).expect("router should build");

        Self {
            router,
            clock,
            store,
            device: Uuid::new_v4(),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn advance(&self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// A request carrying this app's device id and an in-sync client time.
    pub fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        self.request_at(method, uri, body, self.now())
    }

    /// Like [`request`](Self::request) with an explicit `X-Client-Time`.
    pub fn request_at(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        client_time: Timestamp,
    ) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(DEVICE_ID_HEADER, self.device.to_string())
            .header(
                CLIENT_TIME_HEADER,
                client_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(self.request(Method::GET, uri, None)).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(self.request(Method::POST, uri, body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(self.request(Method::PUT, uri, Some(body))).await
    }
}
