use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::client::ports::CredentialResolver;
use crate::domain::oauth::errors::OAuthError;
use crate::domain::oauth::models::TokenGrant;
use crate::domain::oauth::models::TokenRequest;
use crate::domain::oauth::models::CLIENT_CREDENTIALS;
use crate::domain::oauth::ports::GrantIssuer;
use crate::domain::oauth::ports::TokenExchangePort;

/// Client credentials token exchange.
///
/// Tokens are only signed after the client secret has been checked.
pub struct TokenExchangeService<CR, GI>
where
    CR: CredentialResolver,
    GI: GrantIssuer,
{
    resolver: Arc<CR>,
    issuer: Arc<GI>,
    issue_refresh_token: bool,
}

impl<CR, GI> TokenExchangeService<CR, GI>
where
    CR: CredentialResolver,
    GI: GrantIssuer,
{
    pub fn new(resolver: Arc<CR>, issuer: Arc<GI>, issue_refresh_token: bool) -> Self {
        Self {
            resolver,
            issuer,
            issue_refresh_token,
        }
    }
}

#[async_trait]
impl<CR, GI> TokenExchangePort for TokenExchangeService<CR, GI>
where
    CR: CredentialResolver,
    GI: GrantIssuer,
{
    async fn exchange(&self, request: TokenRequest) -> Result<TokenGrant, OAuthError> {
        if request.grant_type.is_empty() {
            return Err(OAuthError::InvalidRequest(
                "grant_type is required".to_string(),
            ));
        }
        if request.grant_type != CLIENT_CREDENTIALS {
            return Err(OAuthError::UnsupportedGrantType(request.grant_type));
        }
        if request.client_id.is_empty() {
            return Err(OAuthError::InvalidRequest(
                "client_id is required".to_string(),
            ));
        }

        let credential = self
            .resolver
            .authenticate(&request.client_id, &request.client_secret)
            .await
            .map_err(|e| {
                tracing::info!(client_id = %request.client_id, error = %e, "Client authentication failed");
                OAuthError::from(e)
            })?;

        let scope = request.scope.filter(|scope| !scope.trim().is_empty());

        let tokens = self
            .issuer
            .issue(
                &credential.client_id,
                scope.as_deref().unwrap_or_default(),
                self.issue_refresh_token,
            )
            .map_err(|e| {
                tracing::error!(client_id = %credential.client_id, error = %e, "Token signing failed");
                OAuthError::ServerError(e.to_string())
            })?;

        tracing::info!(client_id = %credential.client_id, "Access token issued");

        Ok(TokenGrant { tokens, scope })
    }
}
