use std::sync::Arc;

use monitabits_core::clock::Clock;
use monitabits_core::store::LockdownStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store: PostgreSQL in production, in-memory without `DATABASE_URL`.
    pub store: Arc<dyn LockdownStore>,
    /// Server clock. The only source of "now" for state transitions.
    pub clock: Arc<dyn Clock>,
    /// Server configuration (read by the request extractors).
    pub config: Arc<ServerConfig>,
}
