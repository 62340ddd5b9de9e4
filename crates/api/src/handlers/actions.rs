//! Handlers for cheat/harm actions and follow-up reflections.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use monitabits_core::action::{FollowUp, FollowUpRequest};
use monitabits_core::services::actions;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::client_time::RequestTime;
use crate::middleware::device::DeviceId;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Response body for `POST /actions/follow-up`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpCreated {
    pub follow_up: FollowUp,
}

// ---------------------------------------------------------------------------
// POST /actions/cheat
// ---------------------------------------------------------------------------

/// Log smoking during lockdown. Rejected unless the session is locked.
pub async fn cheat(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    let outcome = actions::log_cheat(state.store.as_ref(), device_id, time.server).await?;
    Ok(created(outcome, time.server))
}

// ---------------------------------------------------------------------------
// POST /actions/harm
// ---------------------------------------------------------------------------

/// Log smoking during the active period. Starts a new lockdown.
pub async fn harm(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    let outcome = actions::log_harm(state.store.as_ref(), device_id, time.server).await?;
    Ok(created(outcome, time.server))
}

// ---------------------------------------------------------------------------
// Follow-up
// ---------------------------------------------------------------------------

/// GET /actions/follow-up/pending
pub async fn pending_follow_up(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
) -> AppResult<impl IntoResponse> {
    let pending = actions::pending_follow_up(state.store.as_ref(), device_id).await?;
    Ok(Json(DataResponse::new(pending, state.clock.now())))
}

/// POST /actions/follow-up
pub async fn submit_follow_up(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
    ValidatedJson(input): ValidatedJson<FollowUpRequest>,
) -> AppResult<impl IntoResponse> {
    let follow_up =
        actions::submit_follow_up(state.store.as_ref(), device_id, &input, time.server).await?;
    Ok(created(FollowUpCreated { follow_up }, time.server))
}
