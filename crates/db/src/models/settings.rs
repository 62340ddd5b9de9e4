//! Rows of the `settings` table.

use monitabits_core::settings::Settings;
use monitabits_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub device_id: DbId,
    pub lockdown_minutes: i32,
    pub work_minutes: i32,
    pub short_break_minutes: i32,
    pub long_break_minutes: i32,
    pub updated_at: Timestamp,
}

impl From<SettingsRow> for Settings {
    fn from(row: SettingsRow) -> Self {
        Self {
            device_id: row.device_id,
            lockdown_minutes: row.lockdown_minutes,
            work_minutes: row.work_minutes,
            short_break_minutes: row.short_break_minutes,
            long_break_minutes: row.long_break_minutes,
            updated_at: row.updated_at,
        }
    }
}
