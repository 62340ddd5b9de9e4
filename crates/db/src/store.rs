//! [`LockdownStore`] implementation on PostgreSQL.

use async_trait::async_trait;
use monitabits_core::action::{Action, FollowUp};
use monitabits_core::check_in::CheckIn;
use monitabits_core::error::CoreError;
use monitabits_core::session::{Session, SessionStatus};
use monitabits_core::settings::Settings;
use monitabits_core::store::{LockdownStore, StoreResult};
use monitabits_core::timer::{PomodoroRecord, Timer};
use monitabits_core::types::{DbId, Timestamp};

use crate::repositories::{
    ActionRepo, CheckInRepo, DeviceRepo, FollowUpRepo, PomodoroRepo, SessionRepo, SettingsRepo,
    TimerRepo,
};
use crate::DbPool;

/// Postgres-backed record store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a sqlx error onto the domain error.
///
/// - Unique violations (SQLSTATE 23505) on a `uq_` constraint become
///   [`CoreError::Conflict`] so callers can react to lost races.
/// - Everything else is logged and becomes [`CoreError::Internal`].
fn classify(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("Database error".into())
}

/// Convert a list of rows, failing on the first unparseable one.
fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl LockdownStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }

    async fn ensure_device(&self, device_id: DbId, now: Timestamp) -> StoreResult<()> {
        if DeviceRepo::ensure(&self.pool, device_id, now)
            .await
            .map_err(classify)?
        {
            tracing::info!(device_id = %device_id, "New device registered");
        }
        Ok(())
    }

    async fn find_settings(&self, device_id: DbId) -> StoreResult<Option<Settings>> {
        let row = SettingsRepo::find(&self.pool, device_id)
            .await
            .map_err(classify)?;
        Ok(row.map(Settings::from))
    }

    async fn insert_settings_if_absent(&self, defaults: &Settings) -> StoreResult<Settings> {
        let row = SettingsRepo::insert_if_absent(&self.pool, defaults)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<Settings> {
        let row = SettingsRepo::upsert(&self.pool, settings)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn find_live_session(&self, device_id: DbId) -> StoreResult<Option<Session>> {
        SessionRepo::find_live(&self.pool, device_id)
            .await
            .map_err(classify)?
            .map(Session::try_from)
            .transpose()
    }

    async fn find_session(&self, id: DbId) -> StoreResult<Option<Session>> {
        SessionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)?
            .map(Session::try_from)
            .transpose()
    }

    async fn list_sessions(&self, device_id: DbId) -> StoreResult<Vec<Session>> {
        convert_all(
            SessionRepo::list_by_device(&self.pool, device_id)
                .await
                .map_err(classify)?,
        )
    }

    async fn create_session(&self, session: &Session) -> StoreResult<Session> {
        SessionRepo::create(&self.pool, session)
            .await
            .map_err(classify)?
            .try_into()
    }

    async fn update_session(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> StoreResult<Option<Session>> {
        SessionRepo::update_derived(&self.pool, session, expected)
            .await
            .map_err(classify)?
            .map(Session::try_from)
            .transpose()
    }

    async fn create_action(&self, action: &Action) -> StoreResult<Action> {
        ActionRepo::create(&self.pool, action)
            .await
            .map_err(classify)?
            .try_into()
    }

    async fn list_actions(&self, device_id: DbId) -> StoreResult<Vec<Action>> {
        convert_all(
            ActionRepo::list_by_device(&self.pool, device_id)
                .await
                .map_err(classify)?,
        )
    }

    async fn find_pending_harm(&self, device_id: DbId) -> StoreResult<Option<Action>> {
        ActionRepo::find_pending_harm(&self.pool, device_id)
            .await
            .map_err(classify)?
            .map(Action::try_from)
            .transpose()
    }

    async fn create_follow_up(&self, follow_up: &FollowUp) -> StoreResult<FollowUp> {
        let row = FollowUpRepo::create(&self.pool, follow_up)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn list_follow_ups(&self, device_id: DbId) -> StoreResult<Vec<FollowUp>> {
        let rows = FollowUpRepo::list_by_device(&self.pool, device_id)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(FollowUp::from).collect())
    }

    async fn create_check_in(&self, check_in: &CheckIn) -> StoreResult<CheckIn> {
        CheckInRepo::create(&self.pool, check_in)
            .await
            .map_err(classify)?
            .try_into()
    }

    async fn list_check_ins(&self, device_id: DbId) -> StoreResult<Vec<CheckIn>> {
        convert_all(
            CheckInRepo::list_by_device(&self.pool, device_id)
                .await
                .map_err(classify)?,
        )
    }

    async fn find_timer(&self, device_id: DbId) -> StoreResult<Option<Timer>> {
        TimerRepo::find_by_device(&self.pool, device_id)
            .await
            .map_err(classify)?
            .map(Timer::try_from)
            .transpose()
    }

    async fn save_timer(&self, timer: &Timer) -> StoreResult<Timer> {
        TimerRepo::upsert(&self.pool, timer)
            .await
            .map_err(classify)?
            .try_into()
    }

    async fn create_pomodoro_record(
        &self,
        record: &PomodoroRecord,
    ) -> StoreResult<PomodoroRecord> {
        PomodoroRepo::create(&self.pool, record)
            .await
            .map_err(classify)?
            .try_into()
    }

    async fn list_pomodoro_records(&self, device_id: DbId) -> StoreResult<Vec<PomodoroRecord>> {
        convert_all(
            PomodoroRepo::list_by_device(&self.pool, device_id)
                .await
                .map_err(classify)?,
        )
    }
}
