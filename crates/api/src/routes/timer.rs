use axum::routing::{get, post};
use axum::Router;

use crate::handlers::timer;
use crate::state::AppState;

/// Routes mounted at `/timer`.
///
/// ```text
/// GET    /current                                  -> current
/// POST   /start                                    -> start
/// POST   /pause                                    -> pause
/// POST   /resume                                   -> resume
/// POST   /reset                                    -> reset
/// GET    /stats                                    -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(timer::current))
        .route("/start", post(timer::start))
        .route("/pause", post(timer::pause))
        .route("/resume", post(timer::resume))
        .route("/reset", post(timer::reset))
        .route("/stats", get(timer::stats))
}
