//! Rows of the `actions` and `follow_ups` tables.

use monitabits_core::action::{Action, Consequences, FollowUp};
use monitabits_core::error::CoreError;
use monitabits_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `actions` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActionRow {
    pub id: DbId,
    pub device_id: DbId,
    pub session_id: DbId,
    pub action_type: String,
    pub server_time: Timestamp,
    pub consequences: Option<Json<Consequences>>,
    pub lockdown_started: bool,
}

impl TryFrom<ActionRow> for Action {
    type Error = CoreError;

    fn try_from(row: ActionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            device_id: row.device_id,
            session_id: row.session_id,
            action_type: row.action_type.parse()?,
            server_time: row.server_time,
            consequences: row.consequences.map(|Json(c)| c),
            lockdown_started: row.lockdown_started,
        })
    }
}

/// A row from the `follow_ups` table.
#[derive(Debug, Clone, FromRow)]
pub struct FollowUpRow {
    pub id: DbId,
    pub device_id: DbId,
    pub action_id: DbId,
    pub question: String,
    pub answer: String,
    pub harm_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

impl From<FollowUpRow> for FollowUp {
    fn from(row: FollowUpRow) -> Self {
        Self {
            id: row.id,
            device_id: row.device_id,
            action_id: row.action_id,
            question: row.question,
            answer: row.answer,
            harm_ids: row.harm_ids,
            created_at: row.created_at,
        }
    }
}
