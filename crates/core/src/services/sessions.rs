//! Lockdown session resolution.
//!
//! [`resolve_current_session`] is the single entry point every lockdown
//! operation goes through: it lazily creates the device's first session and
//! lazily applies expiry transitions, writing the reconciled values back.

use serde::Serialize;
use uuid::Uuid;

use crate::action::HARM_OUTSIDE_ACTIVE;
use crate::check_in::{CheckIn, CheckInOutcome, CheckInType};
use crate::error::CoreError;
use crate::services::settings::ensure_settings;
use crate::session::{reconcile, Reconciled, Session, SessionStatus};
use crate::statistics::{user_stats, UserStats};
use crate::store::LockdownStore;
use crate::types::{DbId, Timestamp};

/// Response body for `GET /sessions/current`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentSession {
    pub session: Session,
    pub user: UserStats,
}

/// Reads of the live session retried after losing a race to a concurrent
/// writer.
const MAX_RESOLVE_ATTEMPTS: usize = 3;

/// Reconcile a stored session and write back anything that changed.
///
/// The write only lands if the stored status is still the one `session` was
/// read with. `None` means another request moved it on and the caller must
/// re-read.
async fn refresh(
    store: &dyn LockdownStore,
    session: &Session,
    now: Timestamp,
) -> Result<Option<Session>, CoreError> {
    let reconciled = reconcile(session, now);
    if !reconciled.is_dirty() {
        return Ok(Some(reconciled.into_session()));
    }

    let written = store
        .update_session(reconciled.session(), session.status)
        .await?;
    match (&written, &reconciled) {
        (Some(stored), Reconciled::Transitioned { from, .. }) => {
            tracing::info!(
                session_id = %stored.id,
                device_id = %stored.device_id,
                from = %from,
                to = %stored.status,
                "Session status transitioned",
            );
        }
        (None, _) => {
            tracing::debug!(session_id = %session.id, "Session changed concurrently, re-reading");
        }
        _ => {}
    }
    Ok(written)
}

/// Create a fresh locked session. `None` means a concurrent request created
/// the live session first and the caller must re-read.
async fn create_locked(
    store: &dyn LockdownStore,
    device_id: DbId,
    lockdown_minutes: i32,
    now: Timestamp,
) -> Result<Option<Session>, CoreError> {
    let fresh = Session::new_locked(Uuid::new_v4(), device_id, lockdown_minutes, now);
    match store.create_session(&fresh).await {
        Ok(session) => {
            tracing::info!(
                session_id = %session.id,
                device_id = %device_id,
                lockdown_minutes,
                "Lockdown session started",
            );
            Ok(Some(session))
        }
        Err(CoreError::Conflict(_)) => {
            tracing::warn!(device_id = %device_id, "Live session created concurrently, reusing it");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// The device's current session, created and reconciled as needed.
pub async fn resolve_current_session(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<Session, CoreError> {
    store.ensure_device(device_id, now).await?;
    let settings = ensure_settings(store, device_id, now).await?;

    for _ in 0..MAX_RESOLVE_ATTEMPTS {
        let resolved = match store.find_live_session(device_id).await? {
            Some(session) => refresh(store, &session, now).await?,
            None => create_locked(store, device_id, settings.lockdown_minutes, now).await?,
        };
        if let Some(session) = resolved {
            return Ok(session);
        }
    }

    tracing::warn!(device_id = %device_id, "Gave up resolving a contended session");
    Err(CoreError::Conflict(
        "Session was modified concurrently, please retry".into(),
    ))
}

/// Supersede an active session with a brand-new lockdown.
///
/// Only reached through a harm action. `active` is completed only if it is
/// still active in the store; otherwise a concurrent request got there first
/// and this one fails with [`CoreError::InvalidAction`]. Uses the device's
/// current settings for the new session's duration.
pub async fn start_lockdown(
    store: &dyn LockdownStore,
    active: &Session,
    now: Timestamp,
) -> Result<Session, CoreError> {
    let device_id = active.device_id;
    let settings = ensure_settings(store, device_id, now).await?;

    let mut completed = active.clone();
    completed.status = SessionStatus::Completed;
    completed.time_remaining = None;
    if store
        .update_session(&completed, SessionStatus::Active)
        .await?
        .is_none()
    {
        return Err(CoreError::InvalidAction(HARM_OUTSIDE_ACTIVE.into()));
    }
    tracing::info!(session_id = %active.id, device_id = %device_id, "Active session completed");

    match create_locked(store, device_id, settings.lockdown_minutes, now).await? {
        Some(session) => Ok(session),
        None => resolve_current_session(store, device_id, now).await,
    }
}

/// `GET /sessions/current`.
pub async fn current_session(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<CurrentSession, CoreError> {
    let session = resolve_current_session(store, device_id, now).await?;
    let sessions = store.list_sessions(device_id).await?;
    let actions = store.list_actions(device_id).await?;

    Ok(CurrentSession {
        session,
        user: user_stats(device_id, &sessions, &actions, now),
    })
}

/// `POST /sessions/check-in` and `/check-out`.
pub async fn record_check_in(
    store: &dyn LockdownStore,
    device_id: DbId,
    check_in_type: CheckInType,
    now: Timestamp,
) -> Result<CheckInOutcome, CoreError> {
    let session = resolve_current_session(store, device_id, now).await?;
    let check_in = store
        .create_check_in(&CheckIn {
            id: Uuid::new_v4(),
            device_id,
            session_id: session.id,
            check_in_type,
            server_time: now,
            created_at: now,
        })
        .await?;

    tracing::info!(
        device_id = %device_id,
        kind = %check_in_type,
        session_status = %session.status,
        "Check-in recorded",
    );
    Ok(CheckInOutcome { check_in, session })
}
