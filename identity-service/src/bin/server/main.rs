use std::sync::Arc;

use auth::Authenticator;
use auth::GrantTokenIssuer;
use auth::SessionKey;
use auth::SessionTokenCodec;
use identity_service::config::Config;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::client::service::ClientService;
use identity_service::domain::oauth::service::TokenExchangeService;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresClientRepository;
use identity_service::outbound::repositories::PostgresClientSecretRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_duration = %config.session.duration,
        redirect_domain = %config.oauth.redirect_domain,
        issue_refresh_token = config.oauth.issue_refresh_token,
        "Configuration loaded"
    );

    let session_key = match config.session.load_key()? {
        Some(key) => key,
        None => {
            tracing::warn!(
                "No session key configured; generated an ephemeral key, sessions will not survive a restart"
            );
            SessionKey::generate()
        }
    };
    let session_codec = SessionTokenCodec::new(&session_key, config.session.validity()?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(session_codec));
    let grant_issuer = Arc::new(GrantTokenIssuer::new(config.oauth.signing_key.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let client_repository = Arc::new(PostgresClientRepository::new(pg_pool.clone()));
    let secret_repository = Arc::new(PostgresClientSecretRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        authenticator,
    ));
    let user_service = Arc::new(UserService::new(user_repository));
    let client_service = Arc::new(ClientService::new(
        client_repository,
        secret_repository,
        config.oauth.redirect_domain.clone(),
    ));
    let token_exchange = Arc::new(TokenExchangeService::new(
        Arc::clone(&client_service),
        grant_issuer,
        config.oauth.issue_refresh_token,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, client_service, token_exchange);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
