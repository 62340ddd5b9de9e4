//! Presence pings. Reporting only; they never move session state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::session::Session;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInType {
    CheckIn,
    CheckOut,
}

impl CheckInType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
        }
    }
}

impl fmt::Display for CheckInType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckInType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(Self::CheckIn),
            "check_out" => Ok(Self::CheckOut),
            other => Err(CoreError::Internal(format!(
                "Unknown check-in type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub device_id: DbId,
    #[serde(skip_serializing)]
    pub session_id: DbId,
    #[serde(rename = "type")]
    pub check_in_type: CheckInType,
    pub server_time: Timestamp,
    pub created_at: Timestamp,
}

/// Response body for `POST /sessions/check-in` and `/check-out`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub check_in: CheckIn,
    pub session: Session,
}
