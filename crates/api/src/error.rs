use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use monitabits_core::error::CoreError;
use serde::Serialize;
use serde_json::json;

/// One failed field in a `VALIDATION_FAILED` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `monitabits_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body or query string failed schema validation.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    /// No route matches the request.
    #[error("Route not found")]
    RouteNotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The error envelope, kept on the response so the path middleware can
/// complete it with the request path.
#[derive(Debug, Clone)]
pub struct ErrorPayload(pub serde_json::Value);

impl AppError {
    /// HTTP status, machine-readable code and client-facing message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::TimeValidationFailed(msg) => (
                    StatusCode::BAD_REQUEST,
                    "TIME_VALIDATION_FAILED",
                    msg.clone(),
                ),
                CoreError::InvalidAction(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_ACTION", msg.clone())
                }
                CoreError::NoPendingFollowUp => (
                    StatusCode::BAD_REQUEST,
                    "NO_PENDING_FOLLOWUP",
                    "No pending follow-up question found".to_string(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::ValidationFailed { message, .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message.clone())
            }
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Route not found".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_SERVER_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        match &self {
            AppError::Core(CoreError::TimeValidationFailed(_))
            | AppError::Core(CoreError::Unauthorized(_)) => {
                tracing::warn!(code, %message, "Request rejected by guard");
            }
            _ => {}
        }

        let mut body = json!({
            "success": false,
            "error": code,
            "message": message,
            "statusCode": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "path": serde_json::Value::Null,
        });
        if let AppError::ValidationFailed { issues, .. } = &self {
            body["issues"] = json!(issues);
        }

        let mut response = (status, axum::Json(body.clone())).into_response();
        response.extensions_mut().insert(ErrorPayload(body));
        response
    }
}
