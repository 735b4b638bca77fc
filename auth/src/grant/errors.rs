use thiserror::Error;

/// Error type for OAuth2 grant token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrantError {
    #[error("Failed to sign access token: {0}")]
    Signing(String),

    #[error("Access token is expired")]
    Expired,

    #[error("Access token is invalid: {0}")]
    Invalid(String),
}
