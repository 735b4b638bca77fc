pub mod client;
pub mod user;

pub use client::PostgresClientRepository;
pub use client::PostgresClientSecretRepository;
pub use user::PostgresUserRepository;
