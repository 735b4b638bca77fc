use serde::Deserialize;
use serde::Serialize;

/// Claim set signed into an OAuth2 access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantClaims {
    /// Client the token was granted to
    pub client_id: String,

    /// Space separated granted scope (may be empty)
    pub scope: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token pair returned from a successful grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantTokens {
    pub access_token: String,

    /// Opaque random value with no cryptographic link to `access_token`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}
