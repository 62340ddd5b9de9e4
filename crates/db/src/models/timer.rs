//! Rows of the `timers` and `pomodoro_sessions` tables.

use monitabits_core::error::CoreError;
use monitabits_core::timer::{PomodoroRecord, Timer};
use monitabits_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `timers` table. One per device.
#[derive(Debug, Clone, FromRow)]
pub struct TimerRow {
    pub id: DbId,
    pub device_id: DbId,
    pub status: String,
    pub timer_type: String,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub started_at: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
}

impl TryFrom<TimerRow> for Timer {
    type Error = CoreError;

    fn try_from(row: TimerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            device_id: row.device_id,
            status: row.status.parse()?,
            timer_type: row.timer_type.parse()?,
            duration_seconds: row.duration_seconds,
            remaining_seconds: row.remaining_seconds,
            started_at: row.started_at,
            paused_at: row.paused_at,
        })
    }
}

/// A row from the `pomodoro_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct PomodoroRow {
    pub id: DbId,
    pub device_id: DbId,
    pub timer_type: String,
    pub duration_seconds: i64,
    pub completed_at: Timestamp,
}

impl TryFrom<PomodoroRow> for PomodoroRecord {
    type Error = CoreError;

    fn try_from(row: PomodoroRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            device_id: row.device_id,
            timer_type: row.timer_type.parse()?,
            duration_seconds: row.duration_seconds,
            completed_at: row.completed_at,
        })
    }
}
