use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::GrantClaims;
use super::claims::GrantTokens;
use super::errors::GrantError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Fixed lifetime of OAuth2 access tokens.
pub const ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 3600;

/// Issues signed OAuth2 access tokens (HS256 JWT) and opaque refresh tokens.
///
/// Must only be called once the requesting client has been authenticated.
pub struct GrantTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl GrantTokenIssuer {
    /// Create a new issuer with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for `iat`/`exp`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue an access token, and a refresh token when requested.
    ///
    /// # Arguments
    /// * `client_id` - Authenticated client identifier
    /// * `scope` - Granted scope
    /// * `want_refresh` - Also generate an opaque refresh token
    ///
    /// # Errors
    /// * `Signing` - Token signing failed
    pub fn issue_grant(
        &self,
        client_id: &str,
        scope: &str,
        want_refresh: bool,
    ) -> Result<GrantTokens, GrantError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + Duration::seconds(ACCESS_TOKEN_VALIDITY_SECONDS);

        let claims = GrantClaims {
            client_id: client_id.to_string(),
            scope: scope.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| GrantError::Signing(e.to_string()))?;

        let refresh_token = want_refresh.then(|| Uuid::new_v4().to_string());

        Ok(GrantTokens {
            access_token,
            refresh_token,
            expires_in: ACCESS_TOKEN_VALIDITY_SECONDS,
        })
    }

    /// Verify an access token signature and expiry.
    ///
    /// This is the only expiry check for grant tokens. A token is accepted
    /// up to and including its `exp` second.
    ///
    /// # Errors
    /// * `Expired` - Token is past its `exp`
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn decode(&self, token: &str) -> Result<GrantClaims, GrantError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<GrantClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => GrantError::Expired,
                _ => GrantError::Invalid(e.to_string()),
            })
    }
}
