use std::env;

use auth::SessionKey;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum HS256 signing secret length in bytes.
const MIN_SIGNING_KEY_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub oauth: OAuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Session token settings.
#[derive(Deserialize, Clone)]
pub struct SessionConfig {
    /// Base64 encoded 32-byte key; a random one is generated when absent
    #[serde(default)]
    pub key: Option<String>,

    /// Token validity, e.g. "24h" or "1h30m"
    #[serde(default = "default_session_duration")]
    pub duration: String,
}

/// OAuth2 token endpoint settings.
#[derive(Deserialize, Clone)]
pub struct OAuthConfig {
    /// HS256 secret used to sign access tokens
    pub signing_key: String,

    #[serde(default = "default_redirect_domain")]
    pub redirect_domain: String,

    /// Whether client credential grants also return a refresh token
    #[serde(default)]
    pub issue_refresh_token: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_session_duration() -> String {
    "24h".to_string()
}

fn default_redirect_domain() -> String {
    "http://localhost:9094".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SESSION__KEY, OAUTH__SIGNING_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Session and OAuth settings are validated here so a bad value stops
    /// the process at startup instead of failing requests later.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SESSION__DURATION=12h overrides session.duration
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Check values that deserialize fine but are unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validity()?;
        self.session.load_key()?;
        self.oauth.validate()?;
        Ok(())
    }
}

impl SessionConfig {
    /// Parsed token validity.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Duration string is malformed or not positive
    pub fn validity(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.duration)
    }

    /// Decode the configured key, if any.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Key is not base64 or not 32 bytes
    pub fn load_key(&self) -> Result<Option<SessionKey>, ConfigError> {
        self.key
            .as_deref()
            .map(|encoded| {
                SessionKey::from_base64(encoded)
                    .map_err(|e| ConfigError::Message(format!("session.key: {}", e)))
            })
            .transpose()
    }
}

impl OAuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ConfigError::Message(format!(
                "oauth.signing_key must be at least {} bytes",
                MIN_SIGNING_KEY_LEN
            )));
        }
        Ok(())
    }
}

// Secrets stay out of Debug output, which ends up in startup logs.
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("duration", &self.duration)
            .finish()
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("signing_key", &"<redacted>")
            .field("redirect_domain", &self.redirect_domain)
            .field("issue_refresh_token", &self.issue_refresh_token)
            .finish()
    }
}

/// Parse a duration such as "300ms", "24h" or "2h 45m".
///
/// The total must be positive.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::Message(format!("invalid duration {:?}: {}", input, reason))
    };

    let parsed = humantime::parse_duration(input.trim()).map_err(|e| invalid(e.to_string()))?;
    if parsed.is_zero() {
        return Err(invalid("must be positive".to_string()));
    }

    Duration::from_std(parsed).map_err(|e| invalid(e.to_string()))
}
