//! Credential and token primitives
//!
//! Provides the security-relevant building blocks of the identity service:
//! - Password hashing (Argon2id)
//! - Stateless encrypted session tokens (PASETO v4.local)
//! - OAuth2 grant tokens (HS256 JWT access token + opaque refresh token)
//! - Authentication coordination
//!
//! Keys are plain values handed to constructors at startup; nothing here
//! holds global state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionKey, SessionTokenCodec};
//!
//! let codec = SessionTokenCodec::new(&SessionKey::generate(), chrono::Duration::hours(24));
//! let token = codec.issue("user123").unwrap();
//! let payload = codec.verify(&token).unwrap();
//! assert_eq!(payload.subject, "user123");
//! ```
//!
//! ## Grant Tokens
//! ```
//! use auth::GrantTokenIssuer;
//!
//! let issuer = GrantTokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let tokens = issuer.issue_grant("client-1", "read", true).unwrap();
//! assert!(tokens.refresh_token.is_some());
//! ```

pub mod authenticator;
pub mod clock;
pub mod grant;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::SystemClock;
pub use grant::GrantClaims;
pub use grant::GrantError;
pub use grant::GrantTokenIssuer;
pub use grant::GrantTokens;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionError;
pub use session::SessionKey;
pub use session::SessionPayload;
pub use session::SessionTokenCodec;
