pub mod authentication;
pub mod client;
pub mod oauth;
pub mod user;
