//! Device identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use monitabits_core::device::{validate_device_id, DEVICE_ID_HEADER};
use monitabits_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The calling device, from a valid `X-Device-Id` header.
///
/// Missing or malformed ids are rejected with `401 UNAUTHORIZED`:
///
/// ```ignore
/// async fn my_handler(DeviceId(device_id): DeviceId) -> AppResult<Json<()>> {
///     tracing::info!(device_id = %device_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeviceId(pub DbId);

impl FromRequestParts<AppState> for DeviceId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|v| v.to_str().ok());

        Ok(DeviceId(validate_device_id(header)?))
    }
}
