//! Repository for the `follow_ups` table.

use monitabits_core::action::FollowUp;
use monitabits_core::types::DbId;
use sqlx::PgPool;

use crate::models::action::FollowUpRow;

/// Column list for `follow_ups` queries.
const COLUMNS: &str = "id, device_id, action_id, question, answer, harm_ids, created_at";

pub struct FollowUpRepo;

impl FollowUpRepo {
    /// Insert an answer. `uq_follow_ups_action` rejects a second answer for
    /// the same action.
    pub async fn create(pool: &PgPool, follow_up: &FollowUp) -> Result<FollowUpRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO follow_ups \
                 (id, device_id, action_id, question, answer, harm_ids, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FollowUpRow>(&query)
            .bind(follow_up.id)
            .bind(follow_up.device_id)
            .bind(follow_up.action_id)
            .bind(&follow_up.question)
            .bind(&follow_up.answer)
            .bind(&follow_up.harm_ids)
            .bind(follow_up.created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_device(pool: &PgPool, device_id: DbId) -> Result<Vec<FollowUpRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM follow_ups WHERE device_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, FollowUpRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }
}
