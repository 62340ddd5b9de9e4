//! Client clock admission check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use monitabits_core::device::{validate_client_time, CLIENT_TIME_HEADER};
use monitabits_core::types::Timestamp;

use crate::error::AppError;
use crate::state::AppState;

/// Server time for a request whose `X-Client-Time` passed the skew check.
///
/// `server` is read once from the state clock; handlers use it as "now" for
/// every state transition in the request. The client's own clock is only
/// used for admission.
#[derive(Debug, Clone, Copy)]
pub struct RequestTime {
    pub server: Timestamp,
}

impl FromRequestParts<AppState> for RequestTime {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let server = state.clock.now();
        let header = parts
            .headers
            .get(CLIENT_TIME_HEADER)
            .and_then(|v| v.to_str().ok());

        validate_client_time(header, server, state.config.client_time_tolerance())?;

        Ok(RequestTime { server })
    }
}
