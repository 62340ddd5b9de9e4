pub mod actions;
pub mod sessions;
pub mod settings;
pub mod statistics;
pub mod timer;
