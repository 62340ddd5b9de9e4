//! Pomodoro timer state machine.
//!
//! Wall-clock based, with no ticking task. While running, the stored
//! `remaining_seconds` is the value at the moment the timer was last
//! started or resumed; the live value is derived from `started_at`.
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed -> (reset) Idle
//! ```
//!
//! Start and reset are accepted from any state. A running timer whose live
//! remaining time reaches zero is completed lazily on the next operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::settings::Settings;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Internal(format!("Unknown timer status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerType {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    /// Configured length of this timer type, in seconds.
    pub fn duration_seconds(self, settings: &Settings) -> i64 {
        let minutes = match self {
            Self::Work => settings.work_minutes,
            Self::ShortBreak => settings.short_break_minutes,
            Self::LongBreak => settings.long_break_minutes,
        };
        i64::from(minutes) * 60
    }
}

impl fmt::Display for TimerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "short_break" => Ok(Self::ShortBreak),
            "long_break" => Ok(Self::LongBreak),
            other => Err(CoreError::Internal(format!("Unknown timer type '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// One timer row per device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    pub status: TimerStatus,
    #[serde(rename = "type")]
    pub timer_type: TimerType,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub started_at: Option<Timestamp>,
    pub paused_at: Option<Timestamp>,
}

/// A finished timer run, kept for statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroRecord {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    #[serde(rename = "type")]
    pub timer_type: TimerType,
    pub duration_seconds: i64,
    pub completed_at: Timestamp,
}

/// Body of `POST /timer/start`. The enum itself is the only constraint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartTimerRequest {
    #[serde(rename = "type")]
    pub timer_type: TimerType,
}

/// Response envelope for every timer endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TimerView {
    pub timer: Timer,
}

impl Timer {
    /// A fresh idle work timer.
    pub fn idle(id: DbId, device_id: DbId, settings: &Settings) -> Self {
        let duration = TimerType::Work.duration_seconds(settings);
        Self {
            id,
            device_id,
            status: TimerStatus::Idle,
            timer_type: TimerType::Work,
            duration_seconds: duration,
            remaining_seconds: duration,
            started_at: None,
            paused_at: None,
        }
    }

    /// Remaining seconds as of `now`, floored and clamped at zero.
    pub fn live_remaining(&self, now: Timestamp) -> i64 {
        match (self.status, self.started_at) {
            (TimerStatus::Running, Some(started)) => {
                let elapsed = (now - started).num_milliseconds().div_euclid(1000).max(0);
                (self.remaining_seconds - elapsed).max(0)
            }
            _ => self.remaining_seconds,
        }
    }

    /// When a running timer reaches zero: the last start or resume plus the
    /// remaining time stored at that moment.
    pub fn ends_at(&self) -> Option<Timestamp> {
        match (self.status, self.started_at) {
            (TimerStatus::Running, Some(started)) => {
                Some(started + chrono::Duration::seconds(self.remaining_seconds))
            }
            _ => None,
        }
    }

    /// Complete a running timer whose time is up.
    ///
    /// Returns `true` when this call performed the completion, in which case
    /// the caller must persist the timer and record the finished run.
    pub fn settle(&mut self, now: Timestamp) -> bool {
        if self.status == TimerStatus::Running && self.live_remaining(now) == 0 {
            self.status = TimerStatus::Completed;
            self.remaining_seconds = 0;
            true
        } else {
            false
        }
    }

    /// Copy of the timer with `remaining_seconds` set to the live value.
    pub fn snapshot(&self, now: Timestamp) -> Self {
        let mut view = self.clone();
        view.remaining_seconds = self.live_remaining(now);
        view
    }

    pub fn start(&mut self, timer_type: TimerType, settings: &Settings, now: Timestamp) {
        let duration = timer_type.duration_seconds(settings);
        self.status = TimerStatus::Running;
        self.timer_type = timer_type;
        self.duration_seconds = duration;
        self.remaining_seconds = duration;
        self.started_at = Some(now);
        self.paused_at = None;
    }

    pub fn pause(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if self.status != TimerStatus::Running {
            return Err(CoreError::InvalidAction("Timer is not running".into()));
        }
        self.remaining_seconds = self.live_remaining(now);
        self.status = TimerStatus::Paused;
        self.paused_at = Some(now);
        Ok(())
    }

    pub fn resume(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if self.status != TimerStatus::Paused {
            return Err(CoreError::InvalidAction("Timer is not paused".into()));
        }
        self.status = TimerStatus::Running;
        self.started_at = Some(now);
        self.paused_at = None;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.status = TimerStatus::Idle;
        self.remaining_seconds = self.duration_seconds;
        self.started_at = None;
        self.paused_at = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
