use auth::AuthenticationError;
use auth::PasswordError;
use auth::SessionError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Errors from registration, login and session resolution
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Unknown email and wrong password are reported identically.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session")]
    InvalidSession,

    #[error(transparent)]
    User(UserError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            other => AuthError::User(other),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => AuthError::SessionExpired,
            SessionError::Invalid(_) | SessionError::InvalidKey(_) => AuthError::InvalidSession,
            SessionError::Creation(reason) => AuthError::Internal(reason),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthError::InvalidCredentials,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => e.into(),
            AuthenticationError::SessionError(e) => e.into(),
        }
    }
}
