use auth::GrantTokens;

/// The only grant type accepted at the token endpoint.
pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// Parsed token endpoint request, after client credentials have been taken
/// from either the form body or HTTP Basic.
#[derive(Clone)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: Option<String>,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Tokens granted to an authenticated client.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub tokens: GrantTokens,
    pub scope: Option<String>,
}
