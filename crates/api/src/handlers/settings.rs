//! Handlers for per-device settings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use monitabits_core::services::settings;
use monitabits_core::settings::UpdateSettings;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::client_time::RequestTime;
use crate::middleware::device::DeviceId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /settings
///
/// Returns the stored settings, persisting defaults on first read.
pub async fn get_settings(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let settings = settings::get_settings(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(settings, now)))
}

/// PUT /settings
///
/// Any subset of fields; each is bounds-checked before anything is written.
/// Existing sessions keep their duration.
pub async fn update_settings(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
    ValidatedJson(input): ValidatedJson<UpdateSettings>,
) -> AppResult<impl IntoResponse> {
    let settings =
        settings::update_settings(state.store.as_ref(), device_id, &input, time.server).await?;
    Ok(Json(DataResponse::new(settings, time.server)))
}
