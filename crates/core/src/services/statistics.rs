//! Statistics service: loads a device's history and hands it to the pure
//! reporting functions in [`crate::statistics`].

use crate::error::CoreError;
use crate::services::sessions::resolve_current_session;
use crate::statistics::{
    daily_details, lockdown_now, summary, LockdownNow, StatisticsDetails, StatisticsSummary,
    StatsDetailsQuery,
};
use crate::store::LockdownStore;
use crate::types::{DbId, Timestamp};

/// `GET /stats/now`.
pub async fn get_now(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<LockdownNow, CoreError> {
    let session = resolve_current_session(store, device_id, now).await?;
    Ok(lockdown_now(session))
}

/// `GET /stats/summary`.
pub async fn get_summary(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<StatisticsSummary, CoreError> {
    // Bring the live session up to date so completed counts are current.
    resolve_current_session(store, device_id, now).await?;

    let sessions = store.list_sessions(device_id).await?;
    let actions = store.list_actions(device_id).await?;
    let check_ins = store.list_check_ins(device_id).await?;
    let follow_ups = store.list_follow_ups(device_id).await?;

    Ok(summary(&sessions, &actions, &check_ins, &follow_ups, now))
}

/// `GET /stats/details`. The query is validated by the caller.
pub async fn get_details(
    store: &dyn LockdownStore,
    device_id: DbId,
    query: &StatsDetailsQuery,
) -> Result<StatisticsDetails, CoreError> {
    let sessions = store.list_sessions(device_id).await?;
    let actions = store.list_actions(device_id).await?;
    let check_ins = store.list_check_ins(device_id).await?;

    Ok(daily_details(query, &sessions, &actions, &check_ins))
}
