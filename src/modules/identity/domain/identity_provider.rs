use super::user_identity::UserIdentity;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Resolves a bearer token into the user it belongs to.
///
/// `Ok(None)` means the token is missing, expired or rejected. `Err` is reserved
/// for the provider itself being unreachable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self, token: &str) -> AppResult<Option<UserIdentity>>;
}
