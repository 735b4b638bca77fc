use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;

/// Port for credential checks and session handling.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Internal` - Password hashing failed
    /// * `User` - Storage failure
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Stored hash is malformed or token creation failed
    /// * `User` - Storage failure
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Resolve a bearer session token to its user.
    ///
    /// # Errors
    /// * `SessionExpired` - Token is past its expiry
    /// * `InvalidSession` - Token is forged, malformed, or its user is gone
    /// * `User` - Storage failure
    async fn resolve_session(&self, token: &str) -> Result<User, AuthError>;
}
