use crate::domain::user::models::User;

/// Successful login: the account and a freshly issued session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session_token: String,
}
