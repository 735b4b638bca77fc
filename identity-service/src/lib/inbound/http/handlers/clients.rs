use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::ClientSecret;
use crate::domain::client::models::SecretId;
use crate::inbound::http::handlers::ApiError;

pub mod add_secret;
pub mod create_client;
pub mod deactivate_secret;
pub mod get_client;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientData {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Client> for ClientData {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            client_id: client.client_id.clone(),
            name: client.name.clone(),
            enabled: client.enabled,
            created_at: client.created_at,
        }
    }
}

/// Secret metadata. The value is only returned once, when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretData {
    pub id: String,
    pub description: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ClientSecret> for SecretData {
    fn from(secret: &ClientSecret) -> Self {
        Self {
            id: secret.id.to_string(),
            description: secret.description.clone(),
            expires_at: secret.expires_at,
            is_active: secret.is_active,
            created_at: secret.created_at,
        }
    }
}

fn parse_client_id(raw: &str) -> Result<ClientId, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(ClientId)
        .map_err(|e| ApiError::BadRequest(format!("Invalid client ID: {}", e)))
}

fn parse_secret_id(raw: &str) -> Result<SecretId, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(SecretId)
        .map_err(|e| ApiError::BadRequest(format!("Invalid secret ID: {}", e)))
}
