pub mod actions;
pub mod health;
pub mod sessions;
pub mod settings;
pub mod statistics;
pub mod timer;

use axum::Router;

use crate::state::AppState;

/// Build the device-scoped route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions/current                                current session + user stats
/// /sessions/check-in                               record a check-in (POST)
/// /sessions/check-out                              record a check-out (POST)
///
/// /actions/cheat                                   smoked during lockdown (POST)
/// /actions/harm                                    smoked while active (POST)
/// /actions/follow-up/pending                       pending reflection question
/// /actions/follow-up                               answer the question (POST)
///
/// /settings                                        get, update (GET, PUT)
///
/// /stats/now                                       live lockdown state
/// /stats/summary                                   lifetime totals
/// /stats/details                                   per-day breakdown
///
/// /timer/current                                   current Pomodoro timer
/// /timer/start                                     start work/break (POST)
/// /timer/pause                                     pause (POST)
/// /timer/resume                                    resume (POST)
/// /timer/reset                                     back to idle (POST)
/// /timer/stats                                     completed Pomodoros
/// ```
///
/// Every route requires `X-Device-Id`. Routes that change or report
/// lockdown state also require `X-Client-Time`; see the handlers.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", sessions::router())
        .nest("/actions", actions::router())
        .nest("/settings", settings::router())
        .nest("/stats", statistics::router())
        .nest("/timer", timer::router())
}
