//! Per-device duration settings.
//!
//! Reading settings never writes: [`Settings::defaults_for`] produces the
//! defaults as a plain value and the settings service decides when to
//! persist them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Defaults and bounds
// ---------------------------------------------------------------------------

pub const DEFAULT_LOCKDOWN_MINUTES: i32 = 60;
pub const DEFAULT_WORK_MINUTES: i32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: i32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: i32 = 15;

pub const MIN_MINUTES: i32 = 1;
/// One week.
pub const MAX_LOCKDOWN_MINUTES: i32 = 10_080;
pub const MAX_WORK_MINUTES: i32 = 240;
pub const MAX_SHORT_BREAK_MINUTES: i32 = 60;
pub const MAX_LONG_BREAK_MINUTES: i32 = 120;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One row per device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing)]
    pub device_id: DbId,
    pub lockdown_minutes: i32,
    pub work_minutes: i32,
    pub short_break_minutes: i32,
    pub long_break_minutes: i32,
    pub updated_at: Timestamp,
}

impl Settings {
    /// The settings a device has before it ever saves any.
    pub fn defaults_for(device_id: DbId, now: Timestamp) -> Self {
        Self {
            device_id,
            lockdown_minutes: DEFAULT_LOCKDOWN_MINUTES,
            work_minutes: DEFAULT_WORK_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            updated_at: now,
        }
    }

    /// Apply a validated patch, leaving absent fields untouched.
    pub fn apply(mut self, patch: &UpdateSettings, now: Timestamp) -> Self {
        if let Some(v) = patch.lockdown_minutes {
            self.lockdown_minutes = v;
        }
        if let Some(v) = patch.work_minutes {
            self.work_minutes = v;
        }
        if let Some(v) = patch.short_break_minutes {
            self.short_break_minutes = v;
        }
        if let Some(v) = patch.long_break_minutes {
            self.long_break_minutes = v;
        }
        self.updated_at = now;
        self
    }
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Body of `PUT /settings`. Every field is optional and bounds-checked.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSettings {
    #[validate(range(min = 1, max = 10080))]
    pub lockdown_minutes: Option<i32>,
    #[validate(range(min = 1, max = 240))]
    pub work_minutes: Option<i32>,
    #[validate(range(min = 1, max = 60))]
    pub short_break_minutes: Option<i32>,
    #[validate(range(min = 1, max = 120))]
    pub long_break_minutes: Option<i32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::defaults_for(Uuid::new_v4(), now());
        assert_eq!(s.lockdown_minutes, 60);
        assert_eq!(
            (s.work_minutes, s.short_break_minutes, s.long_break_minutes),
            (25, 5, 15)
        );
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let base = Settings::defaults_for(Uuid::new_v4(), now());
        let patch = UpdateSettings {
            lockdown_minutes: Some(90),
            ..Default::default()
        };
        let later = now() + chrono::Duration::hours(1);
        let updated = base.clone().apply(&patch, later);
        assert_eq!(updated.lockdown_minutes, 90);
        assert_eq!(updated.work_minutes, base.work_minutes);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn lockdown_bounds_are_inclusive() {
        for ok in [MIN_MINUTES, MAX_LOCKDOWN_MINUTES] {
            let patch = UpdateSettings {
                lockdown_minutes: Some(ok),
                ..Default::default()
            };
            assert!(patch.validate().is_ok(), "{ok} should be accepted");
        }
        for bad in [0, -5, MAX_LOCKDOWN_MINUTES + 1] {
            let patch = UpdateSettings {
                lockdown_minutes: Some(bad),
                ..Default::default()
            };
            let errors = patch.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("lockdown_minutes"));
        }
    }

    #[test]
    fn timer_bounds_are_checked() {
        let patch = UpdateSettings {
            work_minutes: Some(MAX_WORK_MINUTES + 1),
            short_break_minutes: Some(0),
            long_break_minutes: Some(MAX_LONG_BREAK_MINUTES),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("work_minutes"));
        assert!(fields.contains_key("short_break_minutes"));
        assert!(!fields.contains_key("long_break_minutes"));
    }

    #[test]
    fn body_uses_camel_case() {
        let patch: UpdateSettings =
            serde_json::from_str(r#"{"lockdownMinutes": 30}"#).unwrap();
        assert_eq!(patch.lockdown_minutes, Some(30));
        assert!(serde_json::from_str::<UpdateSettings>(r#"{"lockdown_minutes": 30}"#).is_err());
    }
}
