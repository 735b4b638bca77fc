use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::session::SessionError;
use crate::session::SessionPayload;
use crate::session::SessionTokenCodec;

/// Authentication coordinator combining password verification and session
/// token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    session_codec: SessionTokenCodec,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Encrypted session token
    pub session_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator around a configured session codec.
    pub fn new(session_codec: SessionTokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            session_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Principal identifier embedded in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `SessionError` - Token creation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let session_token = self.session_codec.issue(subject)?;

        Ok(AuthenticationResult { session_token })
    }

    /// Reject a login attempt for an unknown principal.
    ///
    /// Spends one Argon2 computation so the response time matches a failed
    /// password check against an existing account.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.hash(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, when the caller has just proven
    /// knowledge of the password.
    pub fn issue_session(&self, subject: &str) -> Result<String, SessionError> {
        self.session_codec.issue(subject)
    }

    /// Validate a session token and return its payload.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Token cannot be decrypted or is malformed
    pub fn validate_session(&self, token: &str) -> Result<SessionPayload, SessionError> {
        self.session_codec.verify(token)
    }
}
