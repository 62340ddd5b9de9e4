//! Cheat/harm action log and follow-up reflections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::session::Session;
use crate::types::{DbId, Timestamp};

/// The single reflection question asked after a harm action.
pub const FOLLOW_UP_QUESTION: &str = "What have you done?";

/// Message attached to every cheat action.
pub const CHEAT_CONSEQUENCE_MESSAGE: &str = "Action logged. Consequences will apply.";

/// Rejection message for a harm action outside the active period.
pub const HARM_OUTSIDE_ACTIVE: &str = "Harm action is only allowed during active period";

// ---------------------------------------------------------------------------
// Action type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Smoked during lockdown; logged, lockdown continues.
    Cheat,
    /// Smoked during the active period; starts a new lockdown.
    Harm,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cheat => "cheat",
            Self::Harm => "harm",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheat" => Ok(Self::Cheat),
            "harm" => Ok(Self::Harm),
            other => Err(CoreError::Internal(format!("Unknown action type '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consequences {
    pub message: String,
    pub additional_lockdown: i32,
}

impl Consequences {
    pub fn for_cheat() -> Self {
        Self {
            message: CHEAT_CONSEQUENCE_MESSAGE.to_string(),
            additional_lockdown: 0,
        }
    }
}

/// An append-only action record. `server_time` is always the server clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    pub session_id: DbId,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub server_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequences: Option<Consequences>,
    pub lockdown_started: bool,
}

/// Response body for `POST /actions/cheat` and `POST /actions/harm`.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub session: Session,
}

// ---------------------------------------------------------------------------
// Follow-up
// ---------------------------------------------------------------------------

/// A reflection answer tied to one harm action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    #[serde(skip_serializing)]
    pub action_id: DbId,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing)]
    pub harm_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

/// Body of `POST /actions/follow-up`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    #[validate(length(min = 1, max = 5000))]
    pub answer: String,
    #[serde(default)]
    pub harm_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingQuestion {
    pub id: DbId,
    pub text: String,
}

/// Response body for `GET /actions/follow-up/pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFollowUp {
    pub has_pending: bool,
    pub question: Option<PendingQuestion>,
    pub last_lockdown_timestamp: Option<Timestamp>,
    pub cycles_missed: Option<u32>,
}

impl PendingFollowUp {
    pub fn none() -> Self {
        Self {
            has_pending: false,
            question: None,
            last_lockdown_timestamp: None,
            cycles_missed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn action_serializes_type_and_session_id() {
        let session_id = Uuid::new_v4();
        let action = Action {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            session_id,
            action_type: ActionType::Cheat,
            server_time: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            consequences: Some(Consequences::for_cheat()),
            lockdown_started: false,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "cheat");
        assert_eq!(json["sessionId"], session_id.to_string());
        assert_eq!(json["consequences"]["additionalLockdown"], 0);
        assert!(json.get("deviceId").is_none());
    }

    #[test]
    fn empty_answer_is_rejected() {
        let req: FollowUpRequest = serde_json::from_str(r#"{"answer": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn harm_ids_must_be_uuids() {
        assert!(
            serde_json::from_str::<FollowUpRequest>(r#"{"answer": "x", "harmIds": ["nope"]}"#)
                .is_err()
        );
    }
}
