use async_trait::async_trait;
use auth::GrantError;
use auth::GrantTokens;

use crate::domain::oauth::errors::OAuthError;
use crate::domain::oauth::models::TokenGrant;
use crate::domain::oauth::models::TokenRequest;

/// Signs grant tokens for an already authenticated client.
pub trait GrantIssuer: Send + Sync + 'static {
    /// # Errors
    /// * `Signing` - Token signing failed
    fn issue(
        &self,
        client_id: &str,
        scope: &str,
        want_refresh: bool,
    ) -> Result<GrantTokens, GrantError>;
}

/// Port for the OAuth2 token exchange.
#[async_trait]
pub trait TokenExchangePort: Send + Sync + 'static {
    /// Authenticate the client and issue tokens.
    ///
    /// # Errors
    /// * `UnsupportedGrantType` - Grant type other than client_credentials
    /// * `InvalidRequest` - Missing client id
    /// * `InvalidClient` - Unknown, disabled, or wrong secret
    /// * `ServerError` - Storage or signing failure
    async fn exchange(&self, request: TokenRequest) -> Result<TokenGrant, OAuthError>;
}
