use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ClientData;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::ports::ClientServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    client_id: Option<String>,
    name: String,
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(body): Json<CreateClientRequest>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    state
        .client_service
        .create_client(CreateClientCommand {
            client_id: body.client_id,
            name: body.name,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::CREATED, client.into()))
}
