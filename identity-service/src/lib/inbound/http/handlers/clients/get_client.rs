use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::parse_client_id;
use super::ClientData;
use super::SecretData;
use crate::domain::client::ports::ClientServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetClientResponseData {
    #[serde(flatten)]
    pub client: ClientData,
    pub secrets: Vec<SecretData>,
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<GetClientResponseData>, ApiError> {
    let id = parse_client_id(&id)?;

    let client = state.client_service.get_client(&id).await?;
    let secrets = state.client_service.list_secrets(&id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetClientResponseData {
            client: (&client).into(),
            secrets: secrets.iter().map(SecretData::from).collect(),
        },
    ))
}
