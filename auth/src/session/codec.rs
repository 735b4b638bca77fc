use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::SecondsFormat;
use chrono::Utc;
use pasetors::claims::Claims;
use pasetors::claims::ClaimsValidationRules;
use pasetors::errors::ClaimValidationError;
use pasetors::errors::Error as PasetoError;
use pasetors::keys::SymmetricKey;
use pasetors::local;
use pasetors::token::UntrustedToken;
use pasetors::version4::V4;
use pasetors::Local;

use super::errors::SessionError;
use super::key::SessionKey;
use super::payload::SessionPayload;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Custom claim holding the serialized `SessionPayload`.
const PAYLOAD_CLAIM: &str = "payload";

/// Implicit assertion binding tokens to their purpose. It is authenticated
/// but never transmitted.
const IMPLICIT_ASSERTION: &[u8] = b"identity-service/session";

/// Stateless session token issuer and verifier.
///
/// Tokens are PASETO `v4.local` (XChaCha20 + BLAKE2b) carrying the standard
/// `jti`, `sub`, `iat`, `nbf` and `exp` claims plus the session payload.
/// Verification needs no server-side state.
///
/// The configured clock stamps issued tokens. Validation checks the claims
/// against the wall clock.
pub struct SessionTokenCodec {
    key: SessionKey,
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionTokenCodec {
    /// Create a codec using the system clock.
    ///
    /// # Arguments
    /// * `key` - Symmetric key shared by every process that verifies tokens
    /// * `duration` - Validity window of newly issued tokens
    pub fn new(key: &SessionKey, duration: Duration) -> Self {
        Self {
            key: key.clone(),
            duration,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used to stamp issued tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a token for the given subject.
    ///
    /// # Errors
    /// * `Creation` - Claim construction or encryption failed
    pub fn issue(&self, subject: &str) -> Result<String, SessionError> {
        self.seal(SessionPayload::new(subject, None))
    }

    /// Issue a token for the given subject carrying a role marker.
    ///
    /// # Errors
    /// * `Creation` - Claim construction or encryption failed
    pub fn issue_with_role(&self, subject: &str, role: &str) -> Result<String, SessionError> {
        self.seal(SessionPayload::new(subject, Some(role.to_string())))
    }

    /// Decrypt and validate a token.
    ///
    /// # Returns
    /// The payload embedded at issuance
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim has passed
    /// * `Invalid` - Anything else: malformed token, failed decryption
    ///   (tampered or foreign key), not yet valid, or missing payload
    pub fn verify(&self, token: &str) -> Result<SessionPayload, SessionError> {
        let untrusted = UntrustedToken::<Local, V4>::try_from(token).map_err(invalid)?;
        let key = self.symmetric_key().map_err(invalid)?;

        let trusted = local::decrypt(
            &key,
            &untrusted,
            &ClaimsValidationRules::new(),
            None,
            Some(IMPLICIT_ASSERTION),
        )
        .map_err(|e| match e {
            PasetoError::ClaimValidation(ClaimValidationError::Exp) => SessionError::Expired,
            other => invalid(other),
        })?;

        let payload = trusted
            .payload_claims()
            .and_then(|claims| claims.get_claim(PAYLOAD_CLAIM))
            .cloned()
            .ok_or_else(|| SessionError::Invalid("missing payload claim".to_string()))?;

        serde_json::from_value(payload)
            .map_err(|e| SessionError::Invalid(format!("malformed payload: {}", e)))
    }

    fn seal(&self, payload: SessionPayload) -> Result<String, SessionError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + self.duration;

        let mut claims = Claims::new().map_err(creation)?;
        claims
            .token_identifier(&payload.id.to_string())
            .map_err(creation)?;
        claims.subject(&payload.subject).map_err(creation)?;
        claims.issued_at(&timestamp(issued_at)).map_err(creation)?;
        claims.not_before(&timestamp(issued_at)).map_err(creation)?;
        claims.expiration(&timestamp(expires_at)).map_err(creation)?;

        let payload =
            serde_json::to_value(&payload).map_err(|e| SessionError::Creation(e.to_string()))?;
        claims
            .add_additional(PAYLOAD_CLAIM, payload)
            .map_err(creation)?;

        let key = self.symmetric_key().map_err(creation)?;
        local::encrypt(&key, &claims, None, Some(IMPLICIT_ASSERTION)).map_err(creation)
    }

    fn symmetric_key(&self) -> Result<SymmetricKey<V4>, PasetoError> {
        SymmetricKey::<V4>::from(self.key.as_bytes())
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn creation(e: PasetoError) -> SessionError {
    SessionError::Creation(e.to_string())
}

fn invalid(e: PasetoError) -> SessionError {
    SessionError::Invalid(e.to_string())
}
