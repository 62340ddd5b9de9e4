//! Rows of the `sessions` table.

use monitabits_core::error::CoreError;
use monitabits_core::session::Session;
use monitabits_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: DbId,
    pub device_id: DbId,
    pub status: String,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub lockdown_minutes: i32,
    pub time_remaining: Option<i64>,
    pub time_ahead: Option<i64>,
}

impl TryFrom<SessionRow> for Session {
    type Error = CoreError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            device_id: row.device_id,
            status: row.status.parse()?,
            start_time: row.start_time,
            end_time: row.end_time,
            lockdown_minutes: row.lockdown_minutes,
            time_remaining: row.time_remaining,
            time_ahead: row.time_ahead,
        })
    }
}
