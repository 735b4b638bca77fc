use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;
use auth::SystemClock;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::generate_client_id;
use crate::domain::client::models::generate_secret_value;
use crate::domain::client::models::AddSecretCommand;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientCredential;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::ClientSecret;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::SecretId;
use crate::domain::client::ports::ClientRepository;
use crate::domain::client::ports::ClientSecretRepository;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::client::ports::CredentialResolver;

/// Client administration and credential resolution.
pub struct ClientService<CR, SR>
where
    CR: ClientRepository,
    SR: ClientSecretRepository,
{
    clients: Arc<CR>,
    secrets: Arc<SR>,
    redirect_domain: String,
    clock: Arc<dyn Clock>,
}

impl<CR, SR> ClientService<CR, SR>
where
    CR: ClientRepository,
    SR: ClientSecretRepository,
{
    /// # Arguments
    /// * `clients` - Client persistence
    /// * `secrets` - Client secret persistence
    /// * `redirect_domain` - Redirect domain reported for every client
    pub fn new(clients: Arc<CR>, secrets: Arc<SR>, redirect_domain: impl Into<String>) -> Self {
        Self {
            clients,
            secrets,
            redirect_domain: redirect_domain.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for secret expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn existing_client(&self, id: &ClientId) -> Result<Client, ClientError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or(ClientError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<CR, SR> ClientServicePort for ClientService<CR, SR>
where
    CR: ClientRepository,
    SR: ClientSecretRepository,
{
    async fn create_client(&self, command: CreateClientCommand) -> Result<Client, ClientError> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(ClientError::InvalidInput("name must not be empty".to_string()));
        }

        let client_id = match command.client_id {
            Some(client_id) => {
                let client_id = client_id.trim().to_string();
                if client_id.is_empty() {
                    return Err(ClientError::InvalidInput(
                        "client_id must not be empty".to_string(),
                    ));
                }
                client_id
            }
            None => generate_client_id(),
        };

        if self.clients.find_by_client_id(&client_id).await?.is_some() {
            return Err(ClientError::AlreadyExists(client_id));
        }

        let client = Client {
            id: ClientId::new(),
            client_id,
            name,
            enabled: true,
            created_at: self.clock.now(),
        };

        let created = self.clients.create(client).await?;
        tracing::info!(client_id = %created.client_id, "Client registered");

        Ok(created)
    }

    async fn get_client(&self, id: &ClientId) -> Result<Client, ClientError> {
        self.existing_client(id).await
    }

    async fn list_secrets(&self, id: &ClientId) -> Result<Vec<ClientSecret>, ClientError> {
        let client = self.existing_client(id).await?;
        self.secrets.list_by_client(&client.id).await
    }

    async fn add_secret(
        &self,
        id: &ClientId,
        command: AddSecretCommand,
    ) -> Result<ClientSecret, ClientError> {
        let client = self.existing_client(id).await?;

        let value = match command.value {
            Some(value) if value.is_empty() => {
                return Err(ClientError::InvalidInput(
                    "secret value must not be empty".to_string(),
                ))
            }
            Some(value) => value,
            None => generate_secret_value(),
        };

        let secret = ClientSecret {
            id: SecretId::new(),
            client: client.id,
            description: command.description,
            value,
            expires_at: command.expires_at,
            is_active: true,
            created_at: self.clock.now(),
        };

        let created = self.secrets.create(secret).await?;
        tracing::info!(
            client_id = %client.client_id,
            secret_id = %created.id,
            "Client secret added"
        );

        Ok(created)
    }

    async fn deactivate_secret(
        &self,
        id: &ClientId,
        secret_id: &SecretId,
    ) -> Result<ClientSecret, ClientError> {
        let secret = self
            .secrets
            .find_by_id(secret_id)
            .await?
            .filter(|secret| secret.client == *id)
            .ok_or(ClientError::SecretNotFound(secret_id.to_string()))?;

        let updated = self.secrets.set_active(&secret.id, false).await?;
        tracing::info!(secret_id = %updated.id, "Client secret deactivated");

        Ok(updated)
    }
}

#[async_trait]
impl<CR, SR> CredentialResolver for ClientService<CR, SR>
where
    CR: ClientRepository,
    SR: ClientSecretRepository,
{
    async fn resolve(&self, client_id: &str) -> Result<ClientCredential, ClientError> {
        let client = self
            .clients
            .find_by_client_id(client_id)
            .await?
            .filter(|client| client.enabled)
            .ok_or(ClientError::NotFound(client_id.to_string()))?;

        let now = self.clock.now();
        let secrets = self
            .secrets
            .list_by_client(&client.id)
            .await?
            .into_iter()
            .filter(|secret| secret.is_usable(now))
            .map(|secret| secret.value)
            .collect();

        Ok(ClientCredential {
            client_id: client.client_id,
            secrets,
            redirect_domain: self.redirect_domain.clone(),
        })
    }

    async fn authenticate(
        &self,
        client_id: &str,
        presented_secret: &str,
    ) -> Result<ClientCredential, ClientError> {
        let credential = self.resolve(client_id).await?;

        if !credential.matches(presented_secret) {
            tracing::warn!(client_id = %client_id, "Client secret mismatch");
            return Err(ClientError::InvalidSecret);
        }

        Ok(credential)
    }
}
