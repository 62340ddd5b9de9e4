//! Repository for the `check_ins` table.

use monitabits_core::check_in::CheckIn;
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::check_in::CheckInRow;

/// Column list for `check_ins` queries.
const COLUMNS: &str = "id, device_id, session_id, check_in_type, server_time, created_at";

pub struct CheckInRepo;

impl CheckInRepo {
    pub async fn create(pool: &PgPool, check_in: &CheckIn) -> Result<CheckInRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO check_ins \
                 (id, device_id, session_id, check_in_type, server_time, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CheckInRow>(&query)
            .bind(check_in.id)
            .bind(check_in.device_id)
            .bind(check_in.session_id)
            .bind(check_in.check_in_type.as_str())
            .bind(check_in.server_time)
            .bind(check_in.created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_device(pool: &PgPool, device_id: DbId) -> Result<Vec<CheckInRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM check_ins WHERE device_id = $1 ORDER BY server_time DESC"
        );
        sqlx::query_as::<_, CheckInRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }
}
