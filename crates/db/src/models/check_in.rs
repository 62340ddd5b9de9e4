use monitabits_core::check_in::CheckIn;
use monitabits_core::error::CoreError;
use monitabits_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `check_ins` table.
#[derive(Debug, Clone, FromRow)]
pub struct CheckInRow {
    pub id: DbId,
    pub device_id: DbId,
    pub session_id: DbId,
    pub check_in_type: String,
    pub server_time: Timestamp,
    pub created_at: Timestamp,
}

impl TryFrom<CheckInRow> for CheckIn {
    type Error = CoreError;

    fn try_from(row: CheckInRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            device_id: row.device_id,
            session_id: row.session_id,
            check_in_type: row.check_in_type.parse()?,
            server_time: row.server_time,
            created_at: row.created_at,
        })
    }
}
