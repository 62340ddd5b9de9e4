//! Orchestration over a [`LockdownStore`](crate::store::LockdownStore).
//!
//! Each function performs one request's worth of work: it reads records,
//! applies the pure rules from the domain modules at the given server time,
//! and writes back what changed. Inputs are already validated by the
//! transport layer.

pub mod actions;
pub mod sessions;
pub mod settings;
pub mod statistics;
pub mod timer;
