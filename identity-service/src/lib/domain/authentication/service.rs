use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Registration, login and session resolution over a user store.
///
/// Holds no mutable state; the session key and hashing parameters live in
/// the shared `Authenticator`.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // The unique index still catches a concurrent registration.
        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!("Login rejected");
            return Err(self
                .authenticator
                .reject_unknown(command.password.expose())
                .into());
        };

        let result = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &user.password_hash,
                &user.id.to_string(),
            )
            .map_err(|e| {
                tracing::info!(user_id = %user.id, "Login rejected");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            session_token: result.session_token,
        })
    }

    async fn resolve_session(&self, token: &str) -> Result<User, AuthError> {
        let payload = self.authenticator.validate_session(token)?;

        let user_id =
            UserId::from_string(&payload.subject).map_err(|_| AuthError::InvalidSession)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidSession)
    }
}
