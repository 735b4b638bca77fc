use thiserror::Error;

use crate::domain::client::errors::ClientError;

/// Token endpoint failures, one variant per RFC 6749 error code in use.
#[derive(Debug, Clone, Error)]
pub enum OAuthError {
    #[error("invalid_request: {0}")]
    InvalidRequest(String),

    #[error("invalid_client")]
    InvalidClient,

    #[error("unsupported_grant_type: {0}")]
    UnsupportedGrantType(String),

    #[error("server_error: {0}")]
    ServerError(String),
}

impl OAuthError {
    /// RFC 6749 section 5.2 error code.
    pub fn code(&self) -> &'static str {
        match self {
            OAuthError::InvalidRequest(_) => "invalid_request",
            OAuthError::InvalidClient => "invalid_client",
            OAuthError::UnsupportedGrantType(_) => "unsupported_grant_type",
            OAuthError::ServerError(_) => "server_error",
        }
    }
}

impl From<ClientError> for OAuthError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) | ClientError::InvalidSecret => OAuthError::InvalidClient,
            other => OAuthError::ServerError(other.to_string()),
        }
    }
}
