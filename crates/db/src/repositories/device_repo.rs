//! Repository for the `devices` table.

use monitabits_core::types::{DbId, Timestamp};
use sqlx::PgPool;

pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a device on first contact. Returns `true` if it was new.
    pub async fn ensure(pool: &PgPool, device_id: DbId, now: Timestamp) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO devices (id, created_at) VALUES ($1, $2) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(device_id)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
