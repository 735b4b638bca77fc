use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::ClientSecret;
use crate::domain::client::models::SecretId;
use crate::domain::client::ports::ClientRepository;
use crate::domain::client::ports::ClientSecretRepository;

const CLIENT_COLUMNS: &str = "id, client_id, name, enabled, created_at";
const SECRET_COLUMNS: &str =
    "id, client_ref, description, value, expires_at, is_active, created_at";

fn database_error(e: sqlx::Error) -> ClientError {
    ClientError::DatabaseError(e.to_string())
}

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    client_id: String,
    name: String,
    enabled: bool,
    created_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId(row.id),
            client_id: row.client_id,
            name: row.name,
            enabled: row.enabled,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, client: Client) -> Result<Client, ClientError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, client_id, name, enabled, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(client.id.0)
        .bind(&client.client_id)
        .bind(&client.name)
        .bind(client.enabled)
        .bind(client.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ClientError::AlreadyExists(client.client_id.clone());
                }
            }
            database_error(e)
        })?;

        Ok(client)
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE id = $1",
            CLIENT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Client::from))
    }

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<Client>, ClientError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {} FROM clients WHERE client_id = $1",
            CLIENT_COLUMNS
        ))
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Client::from))
    }
}

pub struct PostgresClientSecretRepository {
    pool: PgPool,
}

impl PostgresClientSecretRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SecretRow {
    id: Uuid,
    client_ref: Uuid,
    description: String,
    value: String,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<SecretRow> for ClientSecret {
    fn from(row: SecretRow) -> Self {
        ClientSecret {
            id: SecretId(row.id),
            client: ClientId(row.client_ref),
            description: row.description,
            value: row.value,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ClientSecretRepository for PostgresClientSecretRepository {
    async fn create(&self, secret: ClientSecret) -> Result<ClientSecret, ClientError> {
        sqlx::query(
            r#"
            INSERT INTO client_secrets
                (id, client_ref, description, value, expires_at, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(secret.id.0)
        .bind(secret.client.0)
        .bind(&secret.description)
        .bind(&secret.value)
        .bind(secret.expires_at)
        .bind(secret.is_active)
        .bind(secret.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ClientError::NotFound(secret.client.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(secret)
    }

    async fn find_by_id(&self, id: &SecretId) -> Result<Option<ClientSecret>, ClientError> {
        let row = sqlx::query_as::<_, SecretRow>(&format!(
            "SELECT {} FROM client_secrets WHERE id = $1",
            SECRET_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(ClientSecret::from))
    }

    async fn list_by_client(&self, client: &ClientId) -> Result<Vec<ClientSecret>, ClientError> {
        let rows = sqlx::query_as::<_, SecretRow>(&format!(
            "SELECT {} FROM client_secrets WHERE client_ref = $1 ORDER BY created_at ASC",
            SECRET_COLUMNS
        ))
        .bind(client.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(ClientSecret::from).collect())
    }

    async fn set_active(
        &self,
        id: &SecretId,
        active: bool,
    ) -> Result<ClientSecret, ClientError> {
        let row = sqlx::query_as::<_, SecretRow>(&format!(
            "UPDATE client_secrets SET is_active = $2 WHERE id = $1 RETURNING {}",
            SECRET_COLUMNS
        ))
        .bind(id.0)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(ClientSecret::from)
            .ok_or(ClientError::SecretNotFound(id.to_string()))
    }
}
