use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::{Duration, Instant};

pub const USER_AGENT: &str = "AniShelf/0.1";

/// Shared request plumbing for the catalog upstreams.
pub struct CommonHttpHandler;

impl CommonHttpHandler {
    pub fn create_http_client(timeout: Duration, user_agent: &str) -> AppResult<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))
    }

    /// Map non-success statuses onto `Upstream` errors
    pub fn handle_response_status(status: StatusCode, provider_name: &str) -> AppResult<()> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::Upstream(format!(
                "{} rate limit exceeded",
                provider_name
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY
            | StatusCode::GATEWAY_TIMEOUT => Err(AppError::Upstream(format!(
                "{} service unavailable ({})",
                provider_name, status
            ))),
            _ => Err(AppError::Upstream(format!(
                "Unexpected status code from {}: {}",
                provider_name, status
            ))),
        }
    }

    /// Send once, log the call, and reject non-success responses. No retries.
    pub async fn send(
        request: RequestBuilder,
        provider_name: &str,
        operation_name: &str,
    ) -> AppResult<Response> {
        let start = Instant::now();
        LogContext::api_call(provider_name, operation_name, "started", None);

        let response = request.send().await.map_err(|e| {
            LogContext::error_with_context(&e, &format!("{} {} failed", provider_name, operation_name));
            AppError::from(e)
        })?;

        let status = response.status();
        LogContext::api_call(
            provider_name,
            operation_name,
            status.as_str(),
            Some(start.elapsed().as_millis() as u64),
        );

        Self::handle_response_status(status, provider_name)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_pass() {
        assert!(CommonHttpHandler::handle_response_status(StatusCode::OK, "AniList").is_ok());
    }

    #[test]
    fn failures_become_upstream_errors() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = CommonHttpHandler::handle_response_status(status, "Jikan").unwrap_err();
            assert!(matches!(err, AppError::Upstream(_)));
        }
    }
}
