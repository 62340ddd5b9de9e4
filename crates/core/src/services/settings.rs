//! Device settings service.

use crate::error::CoreError;
use crate::settings::{Settings, UpdateSettings};
use crate::store::LockdownStore;
use crate::types::{DbId, Timestamp};

/// The device's settings, or the defaults if none are stored. Never writes.
pub async fn get_or_default(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<Settings, CoreError> {
    Ok(store
        .find_settings(device_id)
        .await?
        .unwrap_or_else(|| Settings::defaults_for(device_id, now)))
}

/// Persist default settings for the device unless it already has some.
pub async fn ensure_settings(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<Settings, CoreError> {
    if let Some(existing) = store.find_settings(device_id).await? {
        return Ok(existing);
    }
    let settings = store
        .insert_settings_if_absent(&Settings::defaults_for(device_id, now))
        .await?;
    tracing::info!(device_id = %device_id, "Created default settings");
    Ok(settings)
}

/// `GET /settings`: registers the device and returns its settings.
pub async fn get_settings(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<Settings, CoreError> {
    store.ensure_device(device_id, now).await?;
    ensure_settings(store, device_id, now).await
}

/// `PUT /settings`: apply an already-validated patch.
///
/// Changes only affect sessions created afterwards; existing sessions keep
/// their duration snapshot.
pub async fn update_settings(
    store: &dyn LockdownStore,
    device_id: DbId,
    patch: &UpdateSettings,
    now: Timestamp,
) -> Result<Settings, CoreError> {
    store.ensure_device(device_id, now).await?;
    let current = get_or_default(store, device_id, now).await?;
    let updated = store.upsert_settings(&current.apply(patch, now)).await?;

    tracing::info!(
        device_id = %device_id,
        lockdown_minutes = updated.lockdown_minutes,
        "Settings updated",
    );
    Ok(updated)
}
