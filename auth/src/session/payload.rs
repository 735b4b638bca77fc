use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Data carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Unique token identifier, fresh for every issuance
    pub id: Uuid,

    /// Authenticated principal
    pub subject: String,

    /// Optional role marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionPayload {
    pub fn new(subject: impl ToString, role: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            role,
        }
    }
}
