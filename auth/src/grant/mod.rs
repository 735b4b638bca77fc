pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::GrantClaims;
pub use claims::GrantTokens;
pub use errors::GrantError;
pub use issuer::GrantTokenIssuer;
pub use issuer::ACCESS_TOKEN_VALIDITY_SECONDS;
