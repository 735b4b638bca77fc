use async_trait::async_trait;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::AddSecretCommand;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientCredential;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::ClientSecret;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::SecretId;

/// Port for OAuth client administration.
#[async_trait]
pub trait ClientServicePort: Send + Sync + 'static {
    /// Register a client, generating its public id when none is given.
    ///
    /// # Errors
    /// * `InvalidInput` - Blank name or client id
    /// * `AlreadyExists` - Public client id is taken
    /// * `DatabaseError` - Database operation failed
    async fn create_client(&self, command: CreateClientCommand) -> Result<Client, ClientError>;

    /// Retrieve a client by internal identifier.
    ///
    /// # Errors
    /// * `NotFound` - Client does not exist
    async fn get_client(&self, id: &ClientId) -> Result<Client, ClientError>;

    /// List every secret of a client, usable or not.
    ///
    /// # Errors
    /// * `NotFound` - Client does not exist
    async fn list_secrets(&self, id: &ClientId) -> Result<Vec<ClientSecret>, ClientError>;

    /// Add a secret to a client. Existing secrets stay valid, which makes
    /// this the first half of a rotation.
    ///
    /// # Errors
    /// * `NotFound` - Client does not exist
    /// * `InvalidInput` - Blank secret value
    async fn add_secret(
        &self,
        id: &ClientId,
        command: AddSecretCommand,
    ) -> Result<ClientSecret, ClientError>;

    /// Deactivate one secret of a client.
    ///
    /// # Errors
    /// * `SecretNotFound` - No such secret on this client
    async fn deactivate_secret(
        &self,
        id: &ClientId,
        secret_id: &SecretId,
    ) -> Result<ClientSecret, ClientError>;
}

/// Resolves and checks client credentials at the token endpoint.
#[async_trait]
pub trait CredentialResolver: Send + Sync + 'static {
    /// Load the usable credential material of a client.
    ///
    /// # Errors
    /// * `NotFound` - Unknown or disabled client
    async fn resolve(&self, client_id: &str) -> Result<ClientCredential, ClientError>;

    /// Resolve a client and check a presented secret against it.
    ///
    /// # Errors
    /// * `NotFound` - Unknown or disabled client
    /// * `InvalidSecret` - No usable secret matches
    async fn authenticate(
        &self,
        client_id: &str,
        presented_secret: &str,
    ) -> Result<ClientCredential, ClientError>;
}

/// Persistence operations for clients.
#[async_trait]
pub trait ClientRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExists` - Public client id is taken
    async fn create(&self, client: Client) -> Result<Client, ClientError>;

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientError>;

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<Client>, ClientError>;
}

/// Persistence operations for client secrets.
#[async_trait]
pub trait ClientSecretRepository: Send + Sync + 'static {
    async fn create(&self, secret: ClientSecret) -> Result<ClientSecret, ClientError>;

    async fn find_by_id(&self, id: &SecretId) -> Result<Option<ClientSecret>, ClientError>;

    /// All secrets of a client, oldest first.
    async fn list_by_client(&self, client: &ClientId) -> Result<Vec<ClientSecret>, ClientError>;

    /// # Errors
    /// * `SecretNotFound` - Secret does not exist
    async fn set_active(&self, id: &SecretId, active: bool)
        -> Result<ClientSecret, ClientError>;
}
