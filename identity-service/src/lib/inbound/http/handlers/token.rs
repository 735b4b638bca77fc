use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Form;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::oauth::errors::OAuthError;
use crate::domain::oauth::models::TokenGrant;
use crate::domain::oauth::models::TokenRequest;
use crate::domain::oauth::ports::TokenExchangePort;
use crate::inbound::http::router::AppState;

/// Form body of an RFC 6749 token request.
#[derive(Deserialize)]
pub struct TokenForm {
    grant_type: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<TokenGrant> for TokenResponse {
    fn from(grant: TokenGrant) -> Self {
        Self {
            access_token: grant.tokens.access_token,
            token_type: "Bearer",
            expires_in: grant.tokens.expires_in,
            refresh_token: grant.tokens.refresh_token,
            scope: grant.scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        let (status, description) = match &self {
            OAuthError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, Some(msg.clone())),
            OAuthError::InvalidClient => (
                StatusCode::UNAUTHORIZED,
                Some("Client authentication failed".to_string()),
            ),
            OAuthError::UnsupportedGrantType(grant_type) => (
                StatusCode::BAD_REQUEST,
                Some(format!("Grant type {:?} is not supported", grant_type)),
            ),
            OAuthError::ServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = OAuthErrorBody {
            error: self.code(),
            error_description: description,
        };

        let mut response = (status, no_store_headers(), Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"token\""),
            );
        }
        response
    }
}

/// OAuth2 token endpoint for the client credentials grant.
///
/// Client credentials are read from HTTP Basic when present, otherwise
/// from the form body.
pub async fn token(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<Response, OAuthError> {
    let Form(form) = form.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;
    let request = token_request(&headers, form)?;

    let grant = state.token_exchange.exchange(request).await?;

    Ok((
        StatusCode::OK,
        no_store_headers(),
        Json(TokenResponse::from(grant)),
    )
        .into_response())
}

fn no_store_headers() -> [(header::HeaderName, HeaderValue); 2] {
    [
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
    ]
}

fn token_request(headers: &HeaderMap, form: TokenForm) -> Result<TokenRequest, OAuthError> {
    let basic = basic_credentials(headers)?;

    let (client_id, client_secret) = match basic {
        Some((client_id, client_secret)) => {
            if form.client_secret.is_some() {
                return Err(OAuthError::InvalidRequest(
                    "Client credentials sent in both header and body".to_string(),
                ));
            }
            if form.client_id.as_deref().is_some_and(|id| id != client_id) {
                return Err(OAuthError::InvalidRequest(
                    "client_id does not match the Authorization header".to_string(),
                ));
            }
            (client_id, client_secret)
        }
        None => (
            form.client_id.unwrap_or_default(),
            form.client_secret.unwrap_or_default(),
        ),
    };

    Ok(TokenRequest {
        grant_type: form.grant_type.unwrap_or_default(),
        client_id,
        client_secret,
        scope: form.scope,
    })
}

/// Decode `Authorization: Basic base64(urlencode(client_id):urlencode(client_secret))`.
fn basic_credentials(headers: &HeaderMap) -> Result<Option<(String, String)>, OAuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let encoded = value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Basic "))
        .ok_or(OAuthError::InvalidClient)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(OAuthError::InvalidClient)?;

    let (client_id, client_secret) = decoded.split_once(':').ok_or(OAuthError::InvalidClient)?;

    Ok(Some((
        form_decode(client_id)?,
        form_decode(client_secret)?,
    )))
}

/// Undo the `application/x-www-form-urlencoded` encoding that RFC 6749
/// section 2.3.1 applies to both halves of the Basic credentials.
fn form_decode(value: &str) -> Result<String, OAuthError> {
    urlencoding::decode(&value.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|_| OAuthError::InvalidClient)
}
