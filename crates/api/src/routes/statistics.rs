use axum::routing::get;
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET    /now                                      -> now
/// GET    /summary                                  -> summary
/// GET    /details?startDate=&endDate=              -> details
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/now", get(statistics::now))
        .route("/summary", get(statistics::summary))
        .route("/details", get(statistics::details))
}
