use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::parse_client_id;
use super::SecretData;
use crate::domain::client::models::AddSecretCommand;
use crate::domain::client::ports::ClientServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Deserialize)]
pub struct AddSecretRequest {
    #[serde(default)]
    description: String,
    value: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Created secret including its value, which is not shown again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddSecretResponseData {
    #[serde(flatten)]
    pub secret: SecretData,
    pub value: String,
}

pub async fn add_secret(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddSecretRequest>,
) -> Result<ApiSuccess<AddSecretResponseData>, ApiError> {
    let id = parse_client_id(&id)?;

    let secret = state
        .client_service
        .add_secret(
            &id,
            AddSecretCommand {
                description: body.description,
                value: body.value,
                expires_at: body.expires_at,
            },
        )
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AddSecretResponseData {
            secret: (&secret).into(),
            value: secret.value,
        },
    ))
}
