//! Repository for the `sessions` table.
//!
//! The partial unique index `uq_sessions_live_device` guarantees at most
//! one `active` or `locked` row per device; [`SessionRepo::create`] surfaces
//! a violation as a plain `sqlx` database error for the caller to classify.

use monitabits_core::session::{Session, SessionStatus};
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list for `sessions` queries.
const COLUMNS: &str = "\
    id, device_id, status, start_time, end_time, lockdown_minutes, \
    time_remaining, time_ahead";

/// Provides data access for lockdown sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// The newest `active` or `locked` session for a device.
    pub async fn find_live(pool: &PgPool, device_id: DbId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions \
             WHERE device_id = $1 AND status IN ('active', 'locked') \
             ORDER BY start_time DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All sessions for a device, newest first.
    pub async fn list_by_device(pool: &PgPool, device_id: DbId) -> Result<Vec<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions WHERE device_id = $1 ORDER BY start_time DESC"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, session: &Session) -> Result<SessionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions \
                 (id, device_id, status, start_time, end_time, lockdown_minutes, \
                  time_remaining, time_ahead) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(session.id)
            .bind(session.device_id)
            .bind(session.status.as_str())
            .bind(session.start_time)
            .bind(session.end_time)
            .bind(session.lockdown_minutes)
            .bind(session.time_remaining)
            .bind(session.time_ahead)
            .fetch_one(pool)
            .await
    }

    /// Write back status and derived timers if the stored status is still
    /// `expected`. Returns `None` if the row is gone or was changed.
    pub async fn update_derived(
        pool: &PgPool,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE sessions SET \
                 status = $2, time_remaining = $3, time_ahead = $4 \
             WHERE id = $1 AND status = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(session.id)
            .bind(session.status.as_str())
            .bind(session.time_remaining)
            .bind(session.time_ahead)
            .bind(expected.as_str())
            .fetch_optional(pool)
            .await
    }
}
