use crate::modules::identity::domain::{IdentityProvider, UserIdentity};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Used when no auth server is configured: nobody is signed in.
#[derive(Debug, Default, Clone)]
pub struct AnonymousIdentityProvider;

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn current_user(&self, _token: &str) -> AppResult<Option<UserIdentity>> {
        Ok(None)
    }
}
