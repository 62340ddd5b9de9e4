//! Cheat/harm actions and follow-up reflections.
//!
//! The status guard is the only cross-check between the two actions: a
//! cheat while active or a harm while locked is rejected because of the
//! session status, with no further special-casing.

use uuid::Uuid;

use crate::action::{
    Action, ActionOutcome, ActionType, Consequences, FollowUp, FollowUpRequest, PendingFollowUp,
    PendingQuestion, FOLLOW_UP_QUESTION, HARM_OUTSIDE_ACTIVE,
};
use crate::error::CoreError;
use crate::services::sessions::{resolve_current_session, start_lockdown};
use crate::session::SessionStatus;
use crate::store::LockdownStore;
use crate::types::{DbId, Timestamp};

/// `POST /actions/cheat`: only while locked. The lockdown continues
/// unshortened and unextended.
pub async fn log_cheat(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<ActionOutcome, CoreError> {
    let session = resolve_current_session(store, device_id, now).await?;
    if session.status != SessionStatus::Locked {
        return Err(CoreError::InvalidAction(
            "Cheat action is only allowed during lockdown period".into(),
        ));
    }

    let action = store
        .create_action(&Action {
            id: Uuid::new_v4(),
            device_id,
            session_id: session.id,
            action_type: ActionType::Cheat,
            server_time: now,
            consequences: Some(Consequences::for_cheat()),
            lockdown_started: false,
        })
        .await?;

    tracing::info!(
        device_id = %device_id,
        session_id = %session.id,
        action_id = %action.id,
        "Cheat logged",
    );
    Ok(ActionOutcome { action, session })
}

/// `POST /actions/harm`: only while active. Starts a new lockdown and
/// attributes the action to the new session.
pub async fn log_harm(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<ActionOutcome, CoreError> {
    let current = resolve_current_session(store, device_id, now).await?;
    if current.status != SessionStatus::Active {
        return Err(CoreError::InvalidAction(HARM_OUTSIDE_ACTIVE.into()));
    }

    let session = start_lockdown(store, &current, now).await?;
    let action = store
        .create_action(&Action {
            id: Uuid::new_v4(),
            device_id,
            session_id: session.id,
            action_type: ActionType::Harm,
            server_time: now,
            consequences: None,
            lockdown_started: true,
        })
        .await?;

    tracing::info!(
        device_id = %device_id,
        previous_session_id = %current.id,
        session_id = %session.id,
        action_id = %action.id,
        "Harm logged, new lockdown started",
    );
    Ok(ActionOutcome { action, session })
}

/// `GET /actions/follow-up/pending`.
pub async fn pending_follow_up(
    store: &dyn LockdownStore,
    device_id: DbId,
) -> Result<PendingFollowUp, CoreError> {
    let Some(harm) = store.find_pending_harm(device_id).await? else {
        return Ok(PendingFollowUp::none());
    };

    let lockdown = store.find_session(harm.session_id).await?;
    Ok(PendingFollowUp {
        has_pending: true,
        question: Some(PendingQuestion {
            id: harm.id,
            text: FOLLOW_UP_QUESTION.to_string(),
        }),
        last_lockdown_timestamp: lockdown.map(|s| s.start_time),
        cycles_missed: None,
    })
}

/// `POST /actions/follow-up`: answers the newest unanswered harm action.
pub async fn submit_follow_up(
    store: &dyn LockdownStore,
    device_id: DbId,
    request: &FollowUpRequest,
    now: Timestamp,
) -> Result<FollowUp, CoreError> {
    let harm = store
        .find_pending_harm(device_id)
        .await?
        .ok_or(CoreError::NoPendingFollowUp)?;

    let follow_up = store
        .create_follow_up(&FollowUp {
            id: Uuid::new_v4(),
            device_id,
            action_id: harm.id,
            question: FOLLOW_UP_QUESTION.to_string(),
            answer: request.answer.clone(),
            harm_ids: request.harm_ids.clone().unwrap_or_default(),
            created_at: now,
        })
        .await?;

    tracing::info!(
        device_id = %device_id,
        action_id = %harm.id,
        follow_up_id = %follow_up.id,
        "Follow-up answered",
    );
    Ok(follow_up)
}
