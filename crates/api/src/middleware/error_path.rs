//! Fills the `path` field of error envelopes.
//!
//! [`AppError`](crate::error::AppError) renders without knowing the request,
//! so it leaves an [`ErrorPayload`] on the response. This middleware swaps
//! the body for one carrying the request path.

use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorPayload;

pub async fn attach_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    let Some(ErrorPayload(mut body)) = response.extensions().get::<ErrorPayload>().cloned() else {
        return response;
    };
    body["path"] = serde_json::Value::String(path);

    // Status, headers and extensions stay; only the body is replaced.
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Json(body).into_response().into_body())
}
