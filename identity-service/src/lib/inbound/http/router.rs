use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::clients::add_secret::add_secret;
use super::handlers::clients::create_client::create_client;
use super::handlers::clients::deactivate_secret::deactivate_secret;
use super::handlers::clients::get_client::get_client;
use super::handlers::token::token;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_user::get_user;
use super::handlers::users::list_users::list_users;
use super::handlers::users::login::login;
use super::handlers::users::register::register;
use super::handlers::users::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::oauth::ports::TokenExchangePort;
use crate::domain::user::ports::UserServicePort;

pub const API_PREFIX: &str = "/api/v1/auth";

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub client_service: Arc<dyn ClientServicePort>,
    pub token_exchange: Arc<dyn TokenExchangePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    client_service: Arc<dyn ClientServicePort>,
    token_exchange: Arc<dyn TokenExchangePort>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        client_service,
        token_exchange,
    };

    let public_routes = Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/connect/token", post(token));

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/clients", post(create_client))
        .route("/clients/:client_id", get(get_client))
        .route("/clients/:client_id/secrets", post(add_secret))
        .route(
            "/clients/:client_id/secrets/:secret_id",
            delete(deactivate_secret),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens and
    // client secrets.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest(
            API_PREFIX,
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
