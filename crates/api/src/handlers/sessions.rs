//! Handlers for the lockdown session endpoints.
//!
//! All routes here require `X-Device-Id` and a valid `X-Client-Time`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use monitabits_core::check_in::CheckInType;
use monitabits_core::services::sessions;
use monitabits_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::client_time::RequestTime;
use crate::middleware::device::DeviceId;
use crate::response::{created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /sessions/current
// ---------------------------------------------------------------------------

/// The device's current session, created on first contact and reconciled
/// against server time, plus user stats.
pub async fn get_current(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    let current = sessions::current_session(state.store.as_ref(), device_id, time.server).await?;
    Ok(Json(DataResponse::new(current, time.server)))
}

// ---------------------------------------------------------------------------
// POST /sessions/check-in, /sessions/check-out
// ---------------------------------------------------------------------------

pub async fn check_in(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    record(&state, device_id, CheckInType::CheckIn, time).await
}

pub async fn check_out(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    record(&state, device_id, CheckInType::CheckOut, time).await
}

async fn record(
    state: &AppState,
    device_id: DbId,
    check_in_type: CheckInType,
    time: RequestTime,
) -> AppResult<axum::response::Response> {
    let outcome =
        sessions::record_check_in(state.store.as_ref(), device_id, check_in_type, time.server)
            .await?;
    Ok(created(outcome, time.server))
}
