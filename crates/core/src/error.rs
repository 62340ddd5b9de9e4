#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The client-declared time is missing, malformed, or too far from
    /// server time.
    #[error("Time validation failed: {0}")]
    TimeValidationFailed(String),

    /// An action was attempted in a state that does not permit it.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("No pending follow-up question found")]
    NoPendingFollowUp,

    #[error("Internal error: {0}")]
    Internal(String),
}
