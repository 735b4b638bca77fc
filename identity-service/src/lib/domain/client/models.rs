use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::Choice;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Registered OAuth2 client application.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    /// Public identifier presented at the token endpoint
    pub client_id: String,
    pub name: String,
    /// Disabled clients cannot authenticate
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Internal client identifier (primary key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client secret identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretId(pub Uuid);

impl SecretId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SecretId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One secret of a client.
///
/// `value` is never changed after creation. Rotation adds a new secret and
/// deactivates the old one.
#[derive(Clone)]
pub struct ClientSecret {
    pub id: SecretId,
    pub client: ClientId,
    pub description: String,
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ClientSecret {
    /// Whether this secret may authenticate its client at `now`.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecret")
            .field("id", &self.id)
            .field("client", &self.client)
            .field("description", &self.description)
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Resolved credential material for one client.
#[derive(Clone)]
pub struct ClientCredential {
    pub client_id: String,
    /// Values of every usable secret
    pub secrets: Vec<String>,
    pub redirect_domain: String,
}

impl ClientCredential {
    /// Check a presented secret against every usable secret.
    ///
    /// All candidates are compared so timing does not reveal which one
    /// matched.
    pub fn matches(&self, presented: &str) -> bool {
        let matched = self
            .secrets
            .iter()
            .fold(Choice::from(0), |acc, secret| {
                acc | secret.as_bytes().ct_eq(presented.as_bytes())
            });
        bool::from(matched)
    }
}

impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("client_id", &self.client_id)
            .field("secrets", &self.secrets.len())
            .field("redirect_domain", &self.redirect_domain)
            .finish()
    }
}

/// Command to register a client.
#[derive(Debug)]
pub struct CreateClientCommand {
    /// Public identifier; generated when absent
    pub client_id: Option<String>,
    pub name: String,
}

/// Command to add a secret to a client.
#[derive(Debug)]
pub struct AddSecretCommand {
    pub description: String,
    /// Secret value; generated when absent
    pub value: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Length of generated public client identifiers.
pub const GENERATED_CLIENT_ID_LEN: usize = 16;

/// Random bytes in a generated secret value.
const GENERATED_SECRET_BYTES: usize = 32;

/// Generate a public client identifier.
pub fn generate_client_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(GENERATED_CLIENT_ID_LEN)
        .collect()
}

/// Generate a URL-safe secret value from the OS random source.
pub fn generate_secret_value() -> String {
    let mut bytes = [0u8; GENERATED_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
