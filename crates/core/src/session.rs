//! Lockdown session model and status reconciliation.
//!
//! Session status is never advanced by a background task. Instead the
//! stored row is reconciled against the current time on every read:
//!
//! ```text
//! locked --(now >= end_time)--> active --(harm action)--> completed
//! ```
//!
//! `completed` is terminal. Reconciliation is a pure function so the
//! caller decides whether the derived values are written back.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// The wait period has elapsed; the user is ahead of plan.
    Active,
    /// The user must wait until `end_time`.
    Locked,
    /// Superseded by a newer lockdown. Terminal.
    Completed,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Locked => "locked",
            Self::Completed => "completed",
        }
    }

    /// Whether this status counts as the device's current session.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Active | Self::Locked)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "locked" => Ok(Self::Locked),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Internal(format!(
                "Unknown session status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A lockdown session.
///
/// `end_time` and `lockdown_minutes` are fixed at creation; later settings
/// changes never affect an existing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    pub status: SessionStatus,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub lockdown_minutes: i32,
    /// Seconds until `end_time` while locked.
    pub time_remaining: Option<i64>,
    /// Seconds past `end_time` while active.
    pub time_ahead: Option<i64>,
}

impl Session {
    /// Build a fresh `locked` session starting at `now`.
    pub fn new_locked(id: DbId, device_id: DbId, lockdown_minutes: i32, now: Timestamp) -> Self {
        Self {
            id,
            device_id,
            status: SessionStatus::Locked,
            start_time: now,
            end_time: Some(now + Duration::minutes(i64::from(lockdown_minutes))),
            lockdown_minutes,
            time_remaining: Some(i64::from(lockdown_minutes) * 60),
            time_ahead: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Outcome of reconciling a stored session against the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Nothing derived changed (terminal session).
    Unchanged(Session),
    /// Derived fields were recomputed; status is the same.
    Refreshed(Session),
    /// The session changed status.
    Transitioned {
        from: SessionStatus,
        session: Session,
    },
}

impl Reconciled {
    pub fn session(&self) -> &Session {
        match self {
            Self::Unchanged(s) | Self::Refreshed(s) => s,
            Self::Transitioned { session, .. } => session,
        }
    }

    pub fn into_session(self) -> Session {
        match self {
            Self::Unchanged(s) | Self::Refreshed(s) => s,
            Self::Transitioned { session, .. } => session,
        }
    }

    /// Whether the reconciled values need writing back.
    pub fn is_dirty(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// Whole seconds from `from` to `to`, floored.
fn floor_secs(from: Timestamp, to: Timestamp) -> i64 {
    (to - from).num_milliseconds().div_euclid(1000)
}

/// Reconcile a session's status and derived timers with `now`.
///
/// - `completed` is returned unchanged.
/// - Once `now >= end_time`, a live session becomes (or stays) `active`
///   with `time_remaining = None`; `time_ahead` counts whole seconds past
///   `end_time` (zero at the moment of transition).
/// - A `locked` session before `end_time` gets
///   `time_remaining = max(0, floor(end_time - now))`.
pub fn reconcile(session: &Session, now: Timestamp) -> Reconciled {
    let mut next = session.clone();

    match (session.status, session.end_time) {
        (SessionStatus::Completed, _) => Reconciled::Unchanged(next),

        (SessionStatus::Locked, Some(end)) if now >= end => {
            next.status = SessionStatus::Active;
            next.time_remaining = None;
            next.time_ahead = Some(0);
            Reconciled::Transitioned {
                from: SessionStatus::Locked,
                session: next,
            }
        }

        (SessionStatus::Locked, end) => {
            next.time_remaining = end.map(|end| floor_secs(now, end).max(0));
            Reconciled::Refreshed(next)
        }

        (SessionStatus::Active, end) => {
            next.time_remaining = None;
            next.time_ahead = end.map(|end| floor_secs(end, now));
            Reconciled::Refreshed(next)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
