//! In-process [`LockdownStore`] backed by vectors behind an async lock.
//!
//! Records are kept in insertion order, so "newest first" listings break
//! timestamp ties by insertion order. The single write lock makes
//! find-then-create on sessions atomic.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LockdownStore, StoreResult};
use crate::action::{Action, ActionType, FollowUp};
use crate::check_in::CheckIn;
use crate::error::CoreError;
use crate::session::{Session, SessionStatus};
use crate::settings::Settings;
use crate::timer::{PomodoroRecord, Timer};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Tables {
    devices: HashMap<DbId, Timestamp>,
    settings: HashMap<DbId, Settings>,
    sessions: Vec<Session>,
    actions: Vec<Action>,
    follow_ups: Vec<FollowUp>,
    check_ins: Vec<CheckIn>,
    timers: HashMap<DbId, Timer>,
    pomodoro_records: Vec<PomodoroRecord>,
}

/// Volatile store. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records owned by `device_id`, newest first by `key`.
fn newest_first<T: Clone>(
    rows: &[T],
    owned: impl Fn(&T) -> bool,
    key: impl Fn(&T) -> Timestamp,
) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().filter(|r| owned(r)).cloned().collect();
    out.sort_by_key(|r| std::cmp::Reverse(key(r)));
    out
}

#[async_trait]
impl LockdownStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn ensure_device(&self, device_id: DbId, now: Timestamp) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .devices
            .entry(device_id)
            .or_insert(now);
        Ok(())
    }

    async fn find_settings(&self, device_id: DbId) -> StoreResult<Option<Settings>> {
        Ok(self.tables.read().await.settings.get(&device_id).cloned())
    }

    async fn insert_settings_if_absent(&self, defaults: &Settings) -> StoreResult<Settings> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .settings
            .entry(defaults.device_id)
            .or_insert_with(|| defaults.clone())
            .clone())
    }

    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<Settings> {
        let mut tables = self.tables.write().await;
        tables.settings.insert(settings.device_id, settings.clone());
        Ok(settings.clone())
    }

    async fn find_live_session(&self, device_id: DbId) -> StoreResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.sessions,
            |s| s.device_id == device_id && s.status.is_live(),
            |s| s.start_time,
        )
        .into_iter()
        .next())
    }

    async fn find_session(&self, id: DbId) -> StoreResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sessions(&self, device_id: DbId) -> StoreResult<Vec<Session>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.sessions,
            |s| s.device_id == device_id,
            |s| s.start_time,
        ))
    }

    async fn create_session(&self, session: &Session) -> StoreResult<Session> {
        let mut tables = self.tables.write().await;
        if session.status.is_live()
            && tables
                .sessions
                .iter()
                .any(|s| s.device_id == session.device_id && s.status.is_live())
        {
            return Err(CoreError::Conflict(
                "Device already has a live session".into(),
            ));
        }
        tables.sessions.push(session.clone());
        Ok(session.clone())
    }

    async fn update_session(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> StoreResult<Option<Session>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id && s.status == expected)
        else {
            return Ok(None);
        };
        row.status = session.status;
        row.time_remaining = session.time_remaining;
        row.time_ahead = session.time_ahead;
        Ok(Some(row.clone()))
    }

    async fn create_action(&self, action: &Action) -> StoreResult<Action> {
        self.tables.write().await.actions.push(action.clone());
        Ok(action.clone())
    }

    async fn list_actions(&self, device_id: DbId) -> StoreResult<Vec<Action>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.actions,
            |a| a.device_id == device_id,
            |a| a.server_time,
        ))
    }

    async fn find_pending_harm(&self, device_id: DbId) -> StoreResult<Option<Action>> {
        let tables = self.tables.read().await;
        let answered: HashSet<DbId> = tables.follow_ups.iter().map(|f| f.action_id).collect();
        Ok(newest_first(
            &tables.actions,
            |a| {
                a.device_id == device_id
                    && a.action_type == ActionType::Harm
                    && !answered.contains(&a.id)
            },
            |a| a.server_time,
        )
        .into_iter()
        .next())
    }

    async fn create_follow_up(&self, follow_up: &FollowUp) -> StoreResult<FollowUp> {
        self.tables.write().await.follow_ups.push(follow_up.clone());
        Ok(follow_up.clone())
    }

    async fn list_follow_ups(&self, device_id: DbId) -> StoreResult<Vec<FollowUp>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.follow_ups,
            |f| f.device_id == device_id,
            |f| f.created_at,
        ))
    }

    async fn create_check_in(&self, check_in: &CheckIn) -> StoreResult<CheckIn> {
        self.tables.write().await.check_ins.push(check_in.clone());
        Ok(check_in.clone())
    }

    async fn list_check_ins(&self, device_id: DbId) -> StoreResult<Vec<CheckIn>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.check_ins,
            |c| c.device_id == device_id,
            |c| c.server_time,
        ))
    }

    async fn find_timer(&self, device_id: DbId) -> StoreResult<Option<Timer>> {
        Ok(self.tables.read().await.timers.get(&device_id).cloned())
    }

    async fn save_timer(&self, timer: &Timer) -> StoreResult<Timer> {
        let mut tables = self.tables.write().await;
        tables.timers.insert(timer.device_id, timer.clone());
        Ok(timer.clone())
    }

    async fn create_pomodoro_record(
        &self,
        record: &PomodoroRecord,
    ) -> StoreResult<PomodoroRecord> {
        self.tables
            .write()
            .await
            .pomodoro_records
            .push(record.clone());
        Ok(record.clone())
    }

    async fn list_pomodoro_records(&self, device_id: DbId) -> StoreResult<Vec<PomodoroRecord>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.pomodoro_records,
            |r| r.device_id == device_id,
            |r| r.completed_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn second_live_session_conflicts() {
        let store = MemoryStore::new();
        let device = Uuid::new_v4();
        store
            .create_session(&Session::new_locked(Uuid::new_v4(), device, 60, t0()))
            .await
            .unwrap();
        let err = store
            .create_session(&Session::new_locked(Uuid::new_v4(), device, 60, t0()))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[tokio::test]
    async fn update_only_lands_on_expected_status() {
        let store = MemoryStore::new();
        let device = Uuid::new_v4();
        let mut session = Session::new_locked(Uuid::new_v4(), device, 60, t0());
        session.status = SessionStatus::Completed;
        store.create_session(&session).await.unwrap();

        let mut revived = session.clone();
        revived.status = SessionStatus::Active;
        let written = store
            .update_session(&revived, SessionStatus::Active)
            .await
            .unwrap();
        assert_eq!(written, None);

        let stored = store.find_session(session.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert_eq!(store.find_live_session(device).await.unwrap(), None);
    }

    #[tokio::test]
    async fn settings_insert_never_overwrites() {
        let store = MemoryStore::new();
        let device = Uuid::new_v4();
        let mut custom = Settings::defaults_for(device, t0());
        custom.lockdown_minutes = 15;
        store.upsert_settings(&custom).await.unwrap();

        let kept = store
            .insert_settings_if_absent(&Settings::defaults_for(device, t0()))
            .await
            .unwrap();
        assert_eq!(kept.lockdown_minutes, 15);
    }

    #[tokio::test]
    async fn newest_first_breaks_ties_by_insertion() {
        let store = MemoryStore::new();
        let device = Uuid::new_v4();
        let mut first = Session::new_locked(Uuid::new_v4(), device, 60, t0());
        first.status = SessionStatus::Completed;
        let mut second = Session::new_locked(Uuid::new_v4(), device, 60, t0());
        second.status = SessionStatus::Completed;
        let third = Session::new_locked(Uuid::new_v4(), device, 60, t0() - Duration::hours(1));
        for s in [&first, &second, &third] {
            store.create_session(s).await.unwrap();
        }
        let ids: Vec<DbId> = store
            .list_sessions(device)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id, third.id]);
    }
}
