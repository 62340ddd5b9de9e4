//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod action_repo;
pub mod check_in_repo;
pub mod device_repo;
pub mod follow_up_repo;
pub mod pomodoro_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod timer_repo;

pub use action_repo::ActionRepo;
pub use check_in_repo::CheckInRepo;
pub use device_repo::DeviceRepo;
pub use follow_up_repo::FollowUpRepo;
pub use pomodoro_repo::PomodoroRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use timer_repo::TimerRepo;
