//! Repository for the `timers` table.

use monitabits_core::timer::Timer;
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::timer::TimerRow;

/// Column list for `timers` queries.
const COLUMNS: &str = "\
    id, device_id, status, timer_type, duration_seconds, remaining_seconds, \
    started_at, paused_at";

pub struct TimerRepo;

impl TimerRepo {
    pub async fn find_by_device(pool: &PgPool, device_id: DbId) -> Result<Option<TimerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timers WHERE device_id = $1");
        sqlx::query_as::<_, TimerRow>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the device's timer. The row id is kept from the
    /// first insert.
    pub async fn upsert(pool: &PgPool, timer: &Timer) -> Result<TimerRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO timers \
                 (id, device_id, status, timer_type, duration_seconds, remaining_seconds, \
                  started_at, paused_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (device_id) DO UPDATE SET \
                 status = EXCLUDED.status, \
                 timer_type = EXCLUDED.timer_type, \
                 duration_seconds = EXCLUDED.duration_seconds, \
                 remaining_seconds = EXCLUDED.remaining_seconds, \
                 started_at = EXCLUDED.started_at, \
                 paused_at = EXCLUDED.paused_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimerRow>(&query)
            .bind(timer.id)
            .bind(timer.device_id)
            .bind(timer.status.as_str())
            .bind(timer.timer_type.as_str())
            .bind(timer.duration_seconds)
            .bind(timer.remaining_seconds)
            .bind(timer.started_at)
            .bind(timer.paused_at)
            .fetch_one(pool)
            .await
    }
}
