mod common;

use std::sync::Arc;

use auth::Authenticator;
use auth::SessionKey;
use auth::SessionTokenCodec;
use chrono::Duration;
use chrono::Utc;
use common::TestDb;
use identity_service::domain::authentication::errors::AuthError;
use identity_service::domain::authentication::ports::AuthServicePort;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::client::errors::ClientError;
use identity_service::domain::client::models::AddSecretCommand;
use identity_service::domain::client::models::Client;
use identity_service::domain::client::models::ClientId;
use identity_service::domain::client::models::ClientSecret;
use identity_service::domain::client::models::CreateClientCommand;
use identity_service::domain::client::models::SecretId;
use identity_service::domain::client::ports::ClientRepository;
use identity_service::domain::client::ports::ClientSecretRepository;
use identity_service::domain::client::ports::ClientServicePort;
use identity_service::domain::client::ports::CredentialResolver;
use identity_service::domain::client::service::ClientService;
use identity_service::domain::user::errors::UserError;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::PlainPassword;
use identity_service::domain::user::models::RegisterCommand;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::models::UserName;
use identity_service::domain::user::ports::UserRepository;
use identity_service::outbound::repositories::PostgresClientRepository;
use identity_service::outbound::repositories::PostgresClientSecretRepository;
use identity_service::outbound::repositories::PostgresUserRepository;

fn user(email: &str, age: Duration) -> User {
    let created_at = Utc::now() - age;
    User {
        id: UserId::new(),
        name: UserName::new("Test User".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at,
        updated_at: created_at,
    }
}

fn register_command(email: &str) -> RegisterCommand {
    RegisterCommand::new(
        UserName::new("Alice".to_string()).unwrap(),
        EmailAddress::new(email.to_string()).unwrap(),
        PlainPassword::new("s3cret-pass".to_string()).unwrap(),
    )
}

fn client(client_id: &str) -> Client {
    Client {
        id: ClientId::new(),
        client_id: client_id.to_string(),
        name: "Reporting".to_string(),
        enabled: true,
        created_at: Utc::now(),
    }
}

fn secret(client: ClientId, value: &str, age: Duration) -> ClientSecret {
    ClientSecret {
        id: SecretId::new(),
        client,
        description: value.to_string(),
        value: value.to_string(),
        expires_at: None,
        is_active: true,
        created_at: Utc::now() - age,
    }
}

#[tokio::test]
async fn test_user_insert_violating_unique_email() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("alice@example.com", Duration::zero()))
        .await
        .expect("Failed to create user");

    let result = repository
        .create(user("alice@example.com", Duration::zero()))
        .await;

    assert!(matches!(
        result,
        Err(UserError::EmailAlreadyExists(email)) if email == "alice@example.com"
    ));
}

#[tokio::test]
async fn test_concurrent_registration_reports_duplicate_email() {
    let db = TestDb::new().await;
    let repository = Arc::new(PostgresUserRepository::new(db.pool.clone()));
    let authenticator = Arc::new(Authenticator::new(SessionTokenCodec::new(
        &SessionKey::generate(),
        Duration::hours(1),
    )));
    let service = AuthService::new(repository, authenticator);

    let (first, second) = tokio::join!(
        service.register(register_command("alice@example.com")),
        service.register(register_command("alice@example.com")),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AuthError::DuplicateEmail(_)))));
}

#[tokio::test]
async fn test_user_update_to_taken_email() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("alice@example.com", Duration::zero()))
        .await
        .unwrap();
    let mut bob = repository
        .create(user("bob@example.com", Duration::zero()))
        .await
        .unwrap();

    bob.email = EmailAddress::new("alice@example.com".to_string()).unwrap();
    let result = repository.update(bob).await;

    assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
}

#[tokio::test]
async fn test_user_round_trip() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let older = repository
        .create(user("older@example.com", Duration::minutes(2)))
        .await
        .unwrap();
    let newer = repository
        .create(user("newer@example.com", Duration::minutes(1)))
        .await
        .unwrap();

    let found = repository
        .find_by_email(&EmailAddress::new("older@example.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(found.id, older.id);

    let listed = repository.list(0, 10).await.unwrap();
    let ids: Vec<UserId> = listed.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);

    let page = repository.list(1, 10).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, newer.id);

    repository.delete(&older.id).await.unwrap();
    assert!(repository.find_by_id(&older.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_missing_rows() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    let ghost = user("ghost@example.com", Duration::zero());
    assert!(matches!(
        repository.update(ghost.clone()).await,
        Err(UserError::NotFound(_))
    ));
    assert!(matches!(
        repository.delete(&ghost.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_client_insert_violating_unique_client_id() {
    let db = TestDb::new().await;
    let repository = PostgresClientRepository::new(db.pool.clone());

    repository.create(client("reporting-app")).await.unwrap();
    let result = repository.create(client("reporting-app")).await;

    assert!(matches!(
        result,
        Err(ClientError::AlreadyExists(id)) if id == "reporting-app"
    ));
}

#[tokio::test]
async fn test_secret_for_unknown_client() {
    let db = TestDb::new().await;
    let secrets = PostgresClientSecretRepository::new(db.pool.clone());

    let result = secrets
        .create(secret(ClientId::new(), "orphan", Duration::zero()))
        .await;

    assert!(matches!(result, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn test_secret_activation_round_trip() {
    let db = TestDb::new().await;
    let clients = PostgresClientRepository::new(db.pool.clone());
    let secrets = PostgresClientSecretRepository::new(db.pool.clone());

    let app = clients.create(client("reporting-app")).await.unwrap();
    let old = secrets
        .create(secret(app.id, "old-secret", Duration::minutes(5)))
        .await
        .unwrap();
    let new = secrets
        .create(secret(app.id, "new-secret", Duration::zero()))
        .await
        .unwrap();

    let listed = secrets.list_by_client(&app.id).await.unwrap();
    let values: Vec<&str> = listed.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, vec!["old-secret", "new-secret"]);

    let deactivated = secrets.set_active(&old.id, false).await.unwrap();
    assert_eq!(deactivated.id, old.id);
    assert!(!deactivated.is_active);
    assert_eq!(deactivated.value, "old-secret");

    let listed = secrets.list_by_client(&app.id).await.unwrap();
    let active: Vec<SecretId> = listed.iter().filter(|s| s.is_active).map(|s| s.id).collect();
    assert_eq!(active, vec![new.id]);

    let reactivated = secrets.set_active(&old.id, true).await.unwrap();
    assert!(reactivated.is_active);

    assert!(matches!(
        secrets.set_active(&SecretId::new(), false).await,
        Err(ClientError::SecretNotFound(_))
    ));
}

#[tokio::test]
async fn test_secret_rotation_against_database() {
    let db = TestDb::new().await;
    let service = ClientService::new(
        Arc::new(PostgresClientRepository::new(db.pool.clone())),
        Arc::new(PostgresClientSecretRepository::new(db.pool.clone())),
        "http://localhost:9094",
    );

    let app = service
        .create_client(CreateClientCommand {
            client_id: Some("reporting-app".to_string()),
            name: "Reporting".to_string(),
        })
        .await
        .unwrap();

    let add = |value: &str| AddSecretCommand {
        description: value.to_string(),
        value: Some(value.to_string()),
        expires_at: None,
    };
    let old = service.add_secret(&app.id, add("old-secret")).await.unwrap();
    service.add_secret(&app.id, add("new-secret")).await.unwrap();

    assert!(service.authenticate("reporting-app", "old-secret").await.is_ok());
    assert!(service.authenticate("reporting-app", "new-secret").await.is_ok());

    service.deactivate_secret(&app.id, &old.id).await.unwrap();

    assert!(matches!(
        service.authenticate("reporting-app", "old-secret").await,
        Err(ClientError::InvalidSecret)
    ));
    let credential = service
        .authenticate("reporting-app", "new-secret")
        .await
        .unwrap();
    assert_eq!(credential.secrets, vec!["new-secret".to_string()]);
    assert_eq!(credential.redirect_domain, "http://localhost:9094");
}
