//! Request-level admission checks: device identity and client clock.
//!
//! Both run before any handler logic, so a rejected request never reaches
//! the store.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header carrying the client-generated device identifier.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Header carrying the client's idea of the current time.
pub const CLIENT_TIME_HEADER: &str = "x-client-time";

/// Maximum tolerated distance between client and server clocks.
pub const MAX_CLIENT_CLOCK_SKEW_SECS: i64 = 5 * 60;

/// Length of a hyphenated UUID string.
const HYPHENATED_UUID_LEN: usize = 36;

// ---------------------------------------------------------------------------
// Device id
// ---------------------------------------------------------------------------

/// Validate the `X-Device-Id` header value.
///
/// The id must be present and a hyphenated UUID. Surrounding whitespace is
/// ignored.
pub fn validate_device_id(header: Option<&str>) -> Result<DbId, CoreError> {
    let raw = header.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(CoreError::Unauthorized("Device ID is required".into()));
    }
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err(CoreError::Unauthorized(
            "Invalid device ID: Device ID must be a valid UUID".into(),
        ));
    }
    Uuid::try_parse(raw).map_err(|_| {
        CoreError::Unauthorized("Invalid device ID: Device ID must be a valid UUID".into())
    })
}

// ---------------------------------------------------------------------------
// Client time
// ---------------------------------------------------------------------------

/// Validate the `X-Client-Time` header against the server clock.
///
/// Fails with [`CoreError::TimeValidationFailed`] when the header is
/// missing, is not an RFC 3339 datetime, or differs from `server_now` by
/// more than `tolerance` in either direction. A difference of exactly
/// `tolerance` is accepted.
pub fn validate_client_time(
    header: Option<&str>,
    server_now: Timestamp,
    tolerance: Duration,
) -> Result<Timestamp, CoreError> {
    let raw = header.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(CoreError::TimeValidationFailed(
            "X-Client-Time header is required".into(),
        ));
    }

    let client_time = DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            CoreError::TimeValidationFailed(
                "Invalid date format in X-Client-Time header. Expected ISO-8601 format.".into(),
            )
        })?;

    let skew = (server_now - client_time).abs();
    if skew > tolerance {
        return Err(CoreError::TimeValidationFailed(
            "Time validation failed. Please ensure your device time is correct.".into(),
        ));
    }

    Ok(client_time)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn server_now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn tolerance() -> Duration {
        Duration::seconds(MAX_CLIENT_CLOCK_SKEW_SECS)
    }

    // -- validate_device_id --------------------------------------------------

    #[test]
    fn accepts_hyphenated_uuid() {
        let id = validate_device_id(Some("6f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f")).unwrap();
        assert_eq!(id.to_string(), "6f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f");
    }

    #[test]
    fn trims_device_id_whitespace() {
        assert!(validate_device_id(Some("  6f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f ")).is_ok());
    }

    #[test]
    fn missing_device_id_is_unauthorized() {
        assert_matches!(validate_device_id(None), Err(CoreError::Unauthorized(_)));
        assert_matches!(validate_device_id(Some("   ")), Err(CoreError::Unauthorized(_)));
    }

    #[test]
    fn malformed_device_id_is_unauthorized() {
        assert_matches!(
            validate_device_id(Some("not-a-uuid")),
            Err(CoreError::Unauthorized(_))
        );
        // Simple (unhyphenated) form is rejected.
        assert_matches!(
            validate_device_id(Some("6f1c2d3e4b5a4c6d8e7f0a1b2c3d4e5f")),
            Err(CoreError::Unauthorized(_))
        );
    }

    // -- validate_client_time ------------------------------------------------

    #[test]
    fn accepts_exact_server_time() {
        let t = validate_client_time(Some("2025-06-01T12:00:00Z"), server_now(), tolerance());
        assert_eq!(t.unwrap(), server_now());
    }

    #[test]
    fn accepts_offset_timestamps() {
        let t = validate_client_time(
            Some("2025-06-01T14:01:00+02:00"),
            server_now(),
            tolerance(),
        );
        assert_eq!(t.unwrap(), server_now() + Duration::minutes(1));
    }

    #[test]
    fn accepts_skew_at_tolerance_boundary() {
        assert!(validate_client_time(Some("2025-06-01T12:05:00Z"), server_now(), tolerance()).is_ok());
        assert!(validate_client_time(Some("2025-06-01T11:55:00Z"), server_now(), tolerance()).is_ok());
    }

    #[test]
    fn rejects_clock_ahead_beyond_tolerance() {
        assert_matches!(
            validate_client_time(Some("2025-06-01T12:10:00Z"), server_now(), tolerance()),
            Err(CoreError::TimeValidationFailed(_))
        );
    }

    #[test]
    fn rejects_clock_behind_beyond_tolerance() {
        assert_matches!(
            validate_client_time(Some("2025-06-01T11:54:59Z"), server_now(), tolerance()),
            Err(CoreError::TimeValidationFailed(_))
        );
    }

    #[test]
    fn rejects_missing_or_malformed_time() {
        assert_matches!(
            validate_client_time(None, server_now(), tolerance()),
            Err(CoreError::TimeValidationFailed(_))
        );
        assert_matches!(
            validate_client_time(Some("yesterday"), server_now(), tolerance()),
            Err(CoreError::TimeValidationFailed(_))
        );
    }

    #[test]
    fn rejects_time_without_offset() {
        assert_matches!(
            validate_client_time(Some("2025-06-01T12:00:00"), server_now(), tolerance()),
            Err(CoreError::TimeValidationFailed(_))
        );
    }
}
