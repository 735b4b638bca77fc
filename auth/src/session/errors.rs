use thiserror::Error;

/// Error type for session token operations.
///
/// `Expired` is kept apart from `Invalid` so callers can ask the user to
/// log in again instead of rejecting the request as tampered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to create session token: {0}")]
    Creation(String),

    #[error("Session token has expired")]
    Expired,

    #[error("Session token is invalid: {0}")]
    Invalid(String),

    #[error("Invalid session key: {0}")]
    InvalidKey(String),
}
