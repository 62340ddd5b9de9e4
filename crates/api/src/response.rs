//! Shared response envelope types for API handlers.
//!
//! Successful responses use a `{ "success": true, "data": ..., "timestamp": ... }`
//! envelope. Use [`DataResponse`] instead of ad-hoc `serde_json::json!` to
//! get compile-time type safety and consistent serialization.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use monitabits_core::types::Timestamp;
use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(settings, now)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub timestamp: Timestamp,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T, timestamp: Timestamp) -> Self {
        Self {
            success: true,
            data,
            timestamp,
        }
    }
}

/// `201 Created` with the standard envelope.
pub fn created<T: Serialize>(data: T, timestamp: Timestamp) -> Response {
    (StatusCode::CREATED, Json(DataResponse::new(data, timestamp))).into_response()
}
