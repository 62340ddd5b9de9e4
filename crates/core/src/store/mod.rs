//! Record store abstraction.
//!
//! The services in [`crate::services`] only talk to storage through
//! [`LockdownStore`]. `monitabits-db` implements it on PostgreSQL;
//! [`memory::MemoryStore`] implements it in-process for tests and
//! database-less development.
//!
//! Implementations must enforce at most one live (`active` or `locked`)
//! session per device: [`LockdownStore::create_session`] fails with
//! [`CoreError::Conflict`] when one already exists.

pub mod memory;

use async_trait::async_trait;

use crate::action::{Action, FollowUp};
use crate::check_in::CheckIn;
use crate::error::CoreError;
use crate::session::{Session, SessionStatus};
use crate::settings::Settings;
use crate::timer::{PomodoroRecord, Timer};
use crate::types::{DbId, Timestamp};

pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, CoreError>;

#[async_trait]
pub trait LockdownStore: Send + Sync {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // --- Devices ---

    /// Register the device if it has never been seen. Idempotent.
    async fn ensure_device(&self, device_id: DbId, now: Timestamp) -> StoreResult<()>;

    // --- Settings ---

    async fn find_settings(&self, device_id: DbId) -> StoreResult<Option<Settings>>;

    /// Insert `defaults` unless the device already has settings. Returns the
    /// row that exists afterwards; existing values are never overwritten.
    async fn insert_settings_if_absent(&self, defaults: &Settings) -> StoreResult<Settings>;

    /// Insert or replace the device's settings.
    async fn upsert_settings(&self, settings: &Settings) -> StoreResult<Settings>;

    // --- Sessions ---

    /// The newest session with status `active` or `locked`.
    async fn find_live_session(&self, device_id: DbId) -> StoreResult<Option<Session>>;

    async fn find_session(&self, id: DbId) -> StoreResult<Option<Session>>;

    /// All sessions for a device, newest first.
    async fn list_sessions(&self, device_id: DbId) -> StoreResult<Vec<Session>>;

    /// Insert a new session. Fails with [`CoreError::Conflict`] if the
    /// device already has a live session and `session` is live.
    async fn create_session(&self, session: &Session) -> StoreResult<Session>;

    /// Persist `status`, `time_remaining` and `time_ahead`, but only while
    /// the stored status is still `expected`. Returns `None` when the row is
    /// gone or its status moved on; callers re-read instead of overwriting.
    /// The start/end times and duration snapshot are immutable.
    async fn update_session(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> StoreResult<Option<Session>>;

    // --- Actions ---

    async fn create_action(&self, action: &Action) -> StoreResult<Action>;

    /// All actions for a device, newest first.
    async fn list_actions(&self, device_id: DbId) -> StoreResult<Vec<Action>>;

    /// The newest harm action that has no follow-up yet.
    async fn find_pending_harm(&self, device_id: DbId) -> StoreResult<Option<Action>>;

    // --- Follow-ups ---

    async fn create_follow_up(&self, follow_up: &FollowUp) -> StoreResult<FollowUp>;

    async fn list_follow_ups(&self, device_id: DbId) -> StoreResult<Vec<FollowUp>>;

    // --- Check-ins ---

    async fn create_check_in(&self, check_in: &CheckIn) -> StoreResult<CheckIn>;

    async fn list_check_ins(&self, device_id: DbId) -> StoreResult<Vec<CheckIn>>;

    // --- Pomodoro timer ---

    async fn find_timer(&self, device_id: DbId) -> StoreResult<Option<Timer>>;

    /// Insert or replace the device's single timer row.
    async fn save_timer(&self, timer: &Timer) -> StoreResult<Timer>;

    async fn create_pomodoro_record(&self, record: &PomodoroRecord)
        -> StoreResult<PomodoroRecord>;

    async fn list_pomodoro_records(&self, device_id: DbId) -> StoreResult<Vec<PomodoroRecord>>;
}
