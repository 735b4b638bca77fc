use thiserror::Error;

/// Errors for OAuth client administration and credential resolution
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Unknown or disabled client
    #[error("Client not found: {0}")]
    NotFound(String),

    #[error("Client secret does not match")]
    InvalidSecret,

    #[error("Client id already exists: {0}")]
    AlreadyExists(String),

    #[error("Client secret not found: {0}")]
    SecretNotFound(String),

    #[error("Invalid client field: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
