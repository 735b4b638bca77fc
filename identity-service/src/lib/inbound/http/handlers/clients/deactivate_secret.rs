use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_client_id;
use super::parse_secret_id;
use super::SecretData;
use crate::domain::client::ports::ClientServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn deactivate_secret(
    State(state): State<AppState>,
    Path((id, secret_id)): Path<(String, String)>,
) -> Result<ApiSuccess<SecretData>, ApiError> {
    let id = parse_client_id(&id)?;
    let secret_id = parse_secret_id(&secret_id)?;

    state
        .client_service
        .deactivate_secret(&id, &secret_id)
        .await
        .map_err(ApiError::from)
        .map(|ref secret| ApiSuccess::new(StatusCode::OK, secret.into()))
}
