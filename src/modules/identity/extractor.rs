use crate::modules::identity::domain::{IdentityProvider, UserIdentity};
use crate::shared::errors::AppError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use std::sync::Arc;

/// The caller behind the request's `Authorization: Bearer` header, if any.
///
/// Extraction itself never rejects a missing identity; the list service decides
/// which operations need one.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserIdentity>);

impl CurrentUser {
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.0.as_ref()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<dyn IdentityProvider>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(CurrentUser(None));
        };

        let provider = Arc::<dyn IdentityProvider>::from_ref(state);
        let user = provider.current_user(token).await?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/lists");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_is_extracted() {
        let parts = parts_with(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts), Some("abc.def"));
    }

    #[test]
    fn other_schemes_and_blank_tokens_are_ignored() {
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
