use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
