//! Read-only reporting derived from sessions, actions, check-ins, and
//! Pomodoro history.
//!
//! All functions are pure: the statistics service loads the records and
//! passes them in together with the server time.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::action::{Action, ActionType, FollowUp};
use crate::check_in::{CheckIn, CheckInType};
use crate::session::{Session, SessionStatus};
use crate::timer::{PomodoroRecord, TimerType};
use crate::types::{DbId, Timestamp};

/// Widest date range accepted by `GET /stats/details`, in days.
pub const MAX_DETAILS_RANGE_DAYS: i64 = 366;

// ---------------------------------------------------------------------------
// User stats (embedded in GET /sessions/current)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub id: DbId,
    /// Seconds of completed lockdowns.
    pub total_time_saved: i64,
    pub current_streak: u32,
    pub last_relapse: Option<Timestamp>,
}

/// Seconds saved by every completed session.
fn time_saved(sessions: &[Session]) -> i64 {
    sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .map(|s| i64::from(s.lockdown_minutes) * 60)
        .sum()
}

/// Consecutive completed sessions, newest first, whose end time has passed.
fn current_streak(sessions: &[Session], now: Timestamp) -> u32 {
    let mut completed: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .collect();
    completed.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let streak = completed
        .iter()
        .take_while(|s| s.end_time.is_some_and(|end| end <= now))
        .count();
    u32::try_from(streak).unwrap_or(u32::MAX)
}

fn last_harm(actions: &[Action]) -> Option<Timestamp> {
    actions
        .iter()
        .filter(|a| a.action_type == ActionType::Harm)
        .map(|a| a.server_time)
        .max()
}

pub fn user_stats(
    device_id: DbId,
    sessions: &[Session],
    actions: &[Action],
    now: Timestamp,
) -> UserStats {
    UserStats {
        id: device_id,
        total_time_saved: time_saved(sessions),
        current_streak: current_streak(sessions, now),
        last_relapse: last_harm(actions),
    }
}

// ---------------------------------------------------------------------------
// GET /stats/now
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockdownNow {
    pub is_locked: bool,
    pub time_remaining: Option<i64>,
    pub time_ahead: Option<i64>,
    pub session: Session,
}

pub fn lockdown_now(session: Session) -> LockdownNow {
    LockdownNow {
        is_locked: session.status == SessionStatus::Locked,
        time_remaining: session.time_remaining,
        time_ahead: session.time_ahead,
        session,
    }
}

// ---------------------------------------------------------------------------
// GET /stats/summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_time_saved: i64,
    pub current_streak: u32,
    pub last_relapse: Option<Timestamp>,
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub total_cheats: u32,
    pub total_harms: u32,
    pub total_check_ins: u32,
    /// Check-ins made before their session's lockdown ended. Fewer is better.
    pub check_ins_during_lockdown: u32,
    pub follow_ups_answered: u32,
}

fn count<T>(items: impl Iterator<Item = T>) -> u32 {
    u32::try_from(items.count()).unwrap_or(u32::MAX)
}

pub fn summary(
    sessions: &[Session],
    actions: &[Action],
    check_ins: &[CheckIn],
    follow_ups: &[FollowUp],
    now: Timestamp,
) -> StatisticsSummary {
    let end_by_session: HashMap<DbId, Option<Timestamp>> =
        sessions.iter().map(|s| (s.id, s.end_time)).collect();

    let pings = check_ins
        .iter()
        .filter(|c| c.check_in_type == CheckInType::CheckIn);
    let during_lockdown = pings.clone().filter(|c| {
        matches!(end_by_session.get(&c.session_id), Some(Some(end)) if c.server_time < *end)
    });

    StatisticsSummary {
        total_time_saved: time_saved(sessions),
        current_streak: current_streak(sessions, now),
        last_relapse: last_harm(actions),
        total_sessions: count(sessions.iter()),
        completed_sessions: count(
            sessions
                .iter()
                .filter(|s| s.status == SessionStatus::Completed),
        ),
        total_cheats: count(actions.iter().filter(|a| a.action_type == ActionType::Cheat)),
        total_harms: count(actions.iter().filter(|a| a.action_type == ActionType::Harm)),
        total_check_ins: count(pings),
        check_ins_during_lockdown: count(during_lockdown),
        follow_ups_answered: count(follow_ups.iter()),
    }
}

// ---------------------------------------------------------------------------
// GET /stats/details
// ---------------------------------------------------------------------------

/// Query parameters for `GET /stats/details`. Both dates are inclusive.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_details_range"))]
pub struct StatsDetailsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_details_range(query: &StatsDetailsQuery) -> Result<(), ValidationError> {
    if query.end_date < query.start_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("startDate must not be after endDate".into());
        return Err(err);
    }
    if (query.end_date - query.start_date).num_days() >= MAX_DETAILS_RANGE_DAYS {
        let mut err = ValidationError::new("date_range");
        err.message = Some(format!("Date range must not exceed {MAX_DETAILS_RANGE_DAYS} days").into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub sessions_started: u32,
    pub check_ins: u32,
    pub check_outs: u32,
    pub cheats: u32,
    pub harms: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDetails {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub entries: Vec<DailyEntry>,
}

/// One row per UTC day in `[start, end]`, zero-filled.
pub fn daily_details(
    query: &StatsDetailsQuery,
    sessions: &[Session],
    actions: &[Action],
    check_ins: &[CheckIn],
) -> StatisticsDetails {
    let mut days: BTreeMap<NaiveDate, DailyEntry> = BTreeMap::new();
    let mut day = query.start_date;
    while day <= query.end_date {
        days.insert(
            day,
            DailyEntry {
                date: day,
                ..Default::default()
            },
        );
        day += Duration::days(1);
    }

    for s in sessions {
        if let Some(entry) = days.get_mut(&s.start_time.date_naive()) {
            entry.sessions_started += 1;
        }
    }
    for c in check_ins {
        if let Some(entry) = days.get_mut(&c.server_time.date_naive()) {
            match c.check_in_type {
                CheckInType::CheckIn => entry.check_ins += 1,
                CheckInType::CheckOut => entry.check_outs += 1,
            }
        }
    }
    for a in actions {
        if let Some(entry) = days.get_mut(&a.server_time.date_naive()) {
            match a.action_type {
                ActionType::Cheat => entry.cheats += 1,
                ActionType::Harm => entry.harms += 1,
            }
        }
    }

    StatisticsDetails {
        start_date: query.start_date,
        end_date: query.end_date,
        entries: days.into_values().collect(),
    }
}

// ---------------------------------------------------------------------------
// GET /timer/stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSummary {
    pub total_completed: u32,
    pub total_work_sessions: u32,
    pub total_short_breaks: u32,
    pub total_long_breaks: u32,
    /// Work time only.
    pub total_time_seconds: i64,
    /// Runs completed since UTC midnight.
    pub today_count: u32,
}

pub fn pomodoro_summary(records: &[PomodoroRecord], now: Timestamp) -> PomodoroSummary {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let of_type = |t: TimerType| count(records.iter().filter(move |r| r.timer_type == t));

    PomodoroSummary {
        total_completed: count(records.iter()),
        total_work_sessions: of_type(TimerType::Work),
        total_short_breaks: of_type(TimerType::ShortBreak),
        total_long_breaks: of_type(TimerType::LongBreak),
        total_time_seconds: records
            .iter()
            .filter(|r| r.timer_type == TimerType::Work)
            .map(|r| r.duration_seconds)
            .sum(),
        today_count: count(records.iter().filter(|r| r.completed_at >= midnight)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
