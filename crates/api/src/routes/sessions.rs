use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /current                                  -> get_current
/// POST   /check-in                                 -> check_in
/// POST   /check-out                                -> check_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(sessions::get_current))
        .route("/check-in", post(sessions::check_in))
        .route("/check-out", post(sessions::check_out))
}
