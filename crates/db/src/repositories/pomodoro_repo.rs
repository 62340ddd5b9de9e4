//! Repository for the `pomodoro_sessions` table (finished timer runs).

use monitabits_core::timer::PomodoroRecord;
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::timer::PomodoroRow;

/// Column list for `pomodoro_sessions` queries.
const COLUMNS: &str = "id, device_id, timer_type, duration_seconds, completed_at";

pub struct PomodoroRepo;

impl PomodoroRepo {
    pub async fn create(pool: &PgPool, record: &PomodoroRecord) -> Result<PomodoroRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO pomodoro_sessions \
                 (id, device_id, timer_type, duration_seconds, completed_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PomodoroRow>(&query)
            .bind(record.id)
            .bind(record.device_id)
            .bind(record.timer_type.as_str())
            .bind(record.duration_seconds)
            .bind(record.completed_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_device(pool: &PgPool, device_id: DbId) -> Result<Vec<PomodoroRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pomodoro_sessions WHERE device_id = $1 \
             ORDER BY completed_at DESC"
        );
        sqlx::query_as::<_, PomodoroRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }
}
