//! Request guards and response middleware.
//!
//! - [`device::DeviceId`] -- Extracts and validates the `X-Device-Id` header.
//! - [`client_time::RequestTime`] -- Rejects requests whose `X-Client-Time`
//!   is too far from the server clock.
//! - [`error_path::attach_error_path`] -- Completes error envelopes with the
//!   request path.
//!
//! Extractors run before the handler body, so a rejected request never
//! touches the store.

pub mod client_time;
pub mod device;
pub mod error_path;
