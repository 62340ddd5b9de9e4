//! Domain core for the Monitabits lockdown tracker and Pomodoro timer.
//!
//! Pure state machines and validation live in the leaf modules
//! ([`session`], [`timer`], [`device`], [`statistics`]); the
//! [`services`] module orchestrates them against a [`store::LockdownStore`].

pub mod action;
pub mod check_in;
pub mod clock;
pub mod device;
pub mod error;
pub mod services;
pub mod session;
pub mod settings;
pub mod statistics;
pub mod store;
pub mod timer;
pub mod types;
