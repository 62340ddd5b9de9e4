//! Repository for the `settings` table.

use monitabits_core::settings::Settings;
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::settings::SettingsRow;

/// Column list for `settings` queries.
const COLUMNS: &str = "\
    device_id, lockdown_minutes, work_minutes, short_break_minutes, \
    long_break_minutes, updated_at";

/// Provides data access for per-device settings.
pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn find(pool: &PgPool, device_id: DbId) -> Result<Option<SettingsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE device_id = $1");
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert `defaults` unless a row exists, then return whichever row is
    /// stored.
    pub async fn insert_if_absent(
        pool: &PgPool,
        defaults: &Settings,
    ) -> Result<SettingsRow, sqlx::Error> {
        sqlx::query(
            "INSERT INTO settings \
                 (device_id, lockdown_minutes, work_minutes, short_break_minutes, \
                  long_break_minutes, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (device_id) DO NOTHING",
        )
        .bind(defaults.device_id)
        .bind(defaults.lockdown_minutes)
        .bind(defaults.work_minutes)
        .bind(defaults.short_break_minutes)
        .bind(defaults.long_break_minutes)
        .bind(defaults.updated_at)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM settings WHERE device_id = $1");
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(defaults.device_id)
            .fetch_one(pool)
            .await
    }

    pub async fn upsert(pool: &PgPool, settings: &Settings) -> Result<SettingsRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings \
                 (device_id, lockdown_minutes, work_minutes, short_break_minutes, \
                  long_break_minutes, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (device_id) DO UPDATE SET \
                 lockdown_minutes = EXCLUDED.lockdown_minutes, \
                 work_minutes = EXCLUDED.work_minutes, \
                 short_break_minutes = EXCLUDED.short_break_minutes, \
                 long_break_minutes = EXCLUDED.long_break_minutes, \
                 updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SettingsRow>(&query)
            .bind(settings.device_id)
            .bind(settings.lockdown_minutes)
            .bind(settings.work_minutes)
            .bind(settings.short_break_minutes)
            .bind(settings.long_break_minutes)
            .bind(settings.updated_at)
            .fetch_one(pool)
            .await
    }
}
