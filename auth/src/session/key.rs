use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::SessionError;

/// PASETO v4.local key size in bytes.
pub const KEY_LEN: usize = 32;

/// Symmetric key used to seal session tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; KEY_LEN]);

impl SessionKey {
    /// Generate a fresh random key from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Load a key from its standard base64 encoding.
    ///
    /// # Errors
    /// * `InvalidKey` - Not valid base64, or not exactly 32 bytes once decoded
    pub fn from_base64(encoded: &str) -> Result<Self, SessionError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| SessionError::InvalidKey(e.to_string()))?;

        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            SessionError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            ))
        })?;

        Ok(Self(key))
    }

    /// Standard base64 encoding of the key, suitable for configuration files.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}
