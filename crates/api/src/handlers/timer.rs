//! Handlers for the Pomodoro timer.
//!
//! Keyed by `X-Device-Id` only; the timer is not subject to the client
//! clock check.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use monitabits_core::services::timer;
use monitabits_core::timer::StartTimerRequest;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::device::DeviceId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /timer/current
pub async fn current(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let view = timer::current_timer(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(view, now)))
}

/// POST /timer/start
pub async fn start(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    ValidatedJson(input): ValidatedJson<StartTimerRequest>,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let view = timer::start_timer(state.store.as_ref(), device_id, input.timer_type, now).await?;
    Ok(Json(DataResponse::new(view, now)))
}

/// POST /timer/pause
pub async fn pause(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let view = timer::pause_timer(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(view, now)))
}

/// POST /timer/resume
pub async fn resume(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let view = timer::resume_timer(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(view, now)))
}

/// POST /timer/reset
pub async fn reset(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let view = timer::reset_timer(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(view, now)))
}

/// GET /timer/stats
pub async fn stats(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let now = state.clock.now();
    let summary = timer::timer_stats(state.store.as_ref(), device_id, now).await?;
    Ok(Json(DataResponse::new(summary, now)))
}
