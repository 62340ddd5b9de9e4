//! Pomodoro timer service.
//!
//! Every operation loads the device's timer (creating an idle one on first
//! use), settles a run that finished while nobody was looking, applies the
//! transition, and returns a snapshot with the live remaining time.

use uuid::Uuid;

use crate::error::CoreError;
use crate::services::settings::get_or_default;
use crate::statistics::{pomodoro_summary, PomodoroSummary};
use crate::store::LockdownStore;
use crate::timer::{PomodoroRecord, Timer, TimerType, TimerView};
use crate::types::{DbId, Timestamp};

/// Load the timer, completing and recording an expired run.
async fn load_settled(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<Timer, CoreError> {
    store.ensure_device(device_id, now).await?;

    let mut timer = match store.find_timer(device_id).await? {
        Some(timer) => timer,
        None => {
            let settings = get_or_default(store, device_id, now).await?;
            store
                .save_timer(&Timer::idle(Uuid::new_v4(), device_id, &settings))
                .await?
        }
    };

    let ends_at = timer.ends_at();
    if timer.settle(now) {
        // A completed run is stamped with the instant it actually ran out.
        let completed_at = ends_at.filter(|t| *t <= now).unwrap_or(now);
        store
            .create_pomodoro_record(&PomodoroRecord {
                id: Uuid::new_v4(),
                device_id,
                timer_type: timer.timer_type,
                duration_seconds: timer.duration_seconds,
                completed_at,
            })
            .await?;
        timer = store.save_timer(&timer).await?;
        tracing::info!(
            device_id = %device_id,
            timer_type = %timer.timer_type,
            "Pomodoro run completed",
        );
    }
    Ok(timer)
}

fn view(timer: &Timer, now: Timestamp) -> TimerView {
    TimerView {
        timer: timer.snapshot(now),
    }
}

/// `GET /timer/current`.
pub async fn current_timer(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<TimerView, CoreError> {
    let timer = load_settled(store, device_id, now).await?;
    Ok(view(&timer, now))
}

/// `POST /timer/start`: (re)starts a run of the given type from any state.
pub async fn start_timer(
    store: &dyn LockdownStore,
    device_id: DbId,
    timer_type: TimerType,
    now: Timestamp,
) -> Result<TimerView, CoreError> {
    let mut timer = load_settled(store, device_id, now).await?;
    let settings = get_or_default(store, device_id, now).await?;
    timer.start(timer_type, &settings, now);
    let timer = store.save_timer(&timer).await?;

    tracing::info!(
        device_id = %device_id,
        timer_type = %timer_type,
        duration_seconds = timer.duration_seconds,
        "Timer started",
    );
    Ok(view(&timer, now))
}

/// `POST /timer/pause`.
pub async fn pause_timer(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<TimerView, CoreError> {
    let mut timer = load_settled(store, device_id, now).await?;
    timer.pause(now)?;
    let timer = store.save_timer(&timer).await?;
    tracing::debug!(device_id = %device_id, remaining = timer.remaining_seconds, "Timer paused");
    Ok(view(&timer, now))
}

/// `POST /timer/resume`.
pub async fn resume_timer(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<TimerView, CoreError> {
    let mut timer = load_settled(store, device_id, now).await?;
    timer.resume(now)?;
    let timer = store.save_timer(&timer).await?;
    tracing::debug!(device_id = %device_id, "Timer resumed");
    Ok(view(&timer, now))
}

/// `POST /timer/reset`.
pub async fn reset_timer(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<TimerView, CoreError> {
    let mut timer = load_settled(store, device_id, now).await?;
    timer.reset();
    let timer = store.save_timer(&timer).await?;
    tracing::debug!(device_id = %device_id, "Timer reset");
    Ok(view(&timer, now))
}

/// `GET /timer/stats`.
pub async fn timer_stats(
    store: &dyn LockdownStore,
    device_id: DbId,
    now: Timestamp,
) -> Result<PomodoroSummary, CoreError> {
    load_settled(store, device_id, now).await?;
    let records = store.list_pomodoro_records(device_id).await?;
    Ok(pomodoro_summary(&records, now))
}
