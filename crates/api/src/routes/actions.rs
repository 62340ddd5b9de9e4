use axum::routing::{get, post};
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// ```text
/// POST   /cheat                                    -> cheat
/// POST   /harm                                     -> harm
/// GET    /follow-up/pending                        -> pending_follow_up
/// POST   /follow-up                                -> submit_follow_up
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cheat", post(actions::cheat))
        .route("/harm", post(actions::harm))
        .route("/follow-up/pending", get(actions::pending_follow_up))
        .route("/follow-up", post(actions::submit_follow_up))
}
