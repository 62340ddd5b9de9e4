//! Database row structs.
//!
//! Each submodule holds `FromRow` structs matching table rows exactly, plus
//! conversions into the `monitabits-core` domain types. Text status columns
//! are parsed on conversion, so a row with an unknown value surfaces as an
//! internal error instead of a panic.

pub mod action;
pub mod check_in;
pub mod session;
pub mod settings;
pub mod timer;
