use crate::modules::identity::domain::{IdentityProvider, UserIdentity};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Validates access tokens against a Supabase-style auth server
/// (`GET {base_url}/auth/v1/user`).
pub struct SupabaseIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseIdentityProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build auth client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn current_user(&self, token: &str) -> AppResult<Option<UserIdentity>> {
        let start = Instant::now();
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        LogContext::api_call(
            "auth",
            "/auth/v1/user",
            status.as_str(),
            Some(start.elapsed().as_millis() as u64),
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            s if s.is_success() => {
                let user: AuthUserResponse = response.json().await?;
                Ok(Some(UserIdentity {
                    id: user.id,
                    email: user.email,
                }))
            }
            s => Err(AppError::Upstream(format!(
                "Auth server responded with HTTP {}",
                s
            ))),
        }
    }
}
