//! Handlers for reporting endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use monitabits_core::services::statistics;
use monitabits_core::statistics::StatsDetailsQuery;

use crate::error::AppResult;
use crate::extract::ValidatedQuery;
use crate::middleware::client_time::RequestTime;
use crate::middleware::device::DeviceId;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats/now
pub async fn now(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    let now = statistics::get_now(state.store.as_ref(), device_id, time.server).await?;
    Ok(Json(DataResponse::new(now, time.server)))
}

/// GET /stats/summary
pub async fn summary(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
) -> AppResult<impl IntoResponse> {
    let summary = statistics::get_summary(state.store.as_ref(), device_id, time.server).await?;
    Ok(Json(DataResponse::new(summary, time.server)))
}

/// GET /stats/details?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
pub async fn details(
    State(state): State<AppState>,
    DeviceId(device_id): DeviceId,
    time: RequestTime,
    ValidatedQuery(query): ValidatedQuery<StatsDetailsQuery>,
) -> AppResult<impl IntoResponse> {
    let details = statistics::get_details(state.store.as_ref(), device_id, &query).await?;

    tracing::debug!(
        device_id = %device_id,
        start = %query.start_date,
        end = %query.end_date,
        "Statistics details computed",
    );
    Ok(Json(DataResponse::new(details, time.server)))
}
