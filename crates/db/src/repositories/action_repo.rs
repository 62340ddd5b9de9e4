//! Repository for the `actions` table.

use monitabits_core::action::{Action, ActionType};
use monitabits_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::action::ActionRow;

/// Column list for `actions` queries.
const COLUMNS: &str = "\
    id, device_id, session_id, action_type, server_time, consequences, \
    lockdown_started";

/// Provides data access for the append-only action log.
pub struct ActionRepo;

impl ActionRepo {
    pub async fn create(pool: &PgPool, action: &Action) -> Result<ActionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions \
                 (id, device_id, session_id, action_type, server_time, consequences, \
                  lockdown_started) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionRow>(&query)
            .bind(action.id)
            .bind(action.device_id)
            .bind(action.session_id)
            .bind(action.action_type.as_str())
            .bind(action.server_time)
            .bind(action.consequences.as_ref().map(Json))
            .bind(action.lockdown_started)
            .fetch_one(pool)
            .await
    }

    /// All actions for a device, newest first.
    pub async fn list_by_device(pool: &PgPool, device_id: DbId) -> Result<Vec<ActionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions WHERE device_id = $1 \
             ORDER BY server_time DESC, created_at DESC"
        );
        sqlx::query_as::<_, ActionRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }

    /// The newest harm action with no follow-up answer.
    pub async fn find_pending_harm(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<Option<ActionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions \
             WHERE device_id = $1 AND action_type = $2 \
               AND NOT EXISTS ( \
                   SELECT 1 FROM follow_ups WHERE follow_ups.action_id = actions.id \
               ) \
             ORDER BY server_time DESC, created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, ActionRow>(&query)
            .bind(device_id)
            .bind(ActionType::Harm.as_str())
            .fetch_optional(pool)
            .await
    }
}
