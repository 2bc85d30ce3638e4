use super::{
    dto::{AniListRequest, AniListResponse, PageResponse},
    mapper::AniListMapper,
    queries::AniListQueries,
};
use crate::modules::catalog::domain::{CatalogEntry, MovieEntry};
use crate::modules::catalog::infrastructure::external::common::{CommonHttpHandler, USER_AGENT};
use crate::modules::catalog::traits::AiringCatalogClient;
use crate::shared::{
    errors::{AppError, AppResult},
    utils::RateLimiter,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct AniListClient {
    client: Client,
    base_url: String,
    rate_limiter: Arc<RateLimiter>,
}

impl AniListClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = CommonHttpHandler::create_http_client(timeout, USER_AGENT)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            rate_limiter: Arc::new(RateLimiter::for_anilist()),
        })
    }

    /// Execute a GraphQL document. A GraphQL `errors` payload fails the call even
    /// when `data` is also present.
    async fn execute_query(&self, query: &str, variables: Value) -> AppResult<PageResponse> {
        self.rate_limiter.wait().await;

        let request = AniListRequest { query, variables };
        let response = CommonHttpHandler::send(
            self.client.post(&self.base_url).json(&request),
            "AniList",
            "GraphQL query",
        )
        .await?;

        let envelope: AniListResponse<PageResponse> = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse AniList response: {}", e))
        })?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            warn!("AniList returned GraphQL errors: {}", messages.join(", "));
            return Err(AppError::Upstream(format!(
                "AniList GraphQL errors: {}",
                messages.join(", ")
            )));
        }

        envelope
            .data
            .ok_or_else(|| AppError::Upstream("AniList response contained no data".to_string()))
    }
}

#[async_trait]
impl AiringCatalogClient for AniListClient {
    async fn releasing_by_popularity(&self, limit: u32) -> AppResult<Vec<CatalogEntry>> {
        let page = self
            .execute_query(
                AniListQueries::releasing_by_popularity(),
                AniListQueries::page_variables(limit),
            )
            .await?;

        debug!("AniList returned {} releasing titles", page.page.media.len());
        Ok(page
            .page
            .media
            .into_iter()
            .map(AniListMapper::to_catalog_entry)
            .collect())
    }

    async fn movies_by_popularity(&self, limit: u32) -> AppResult<Vec<MovieEntry>> {
        let page = self
            .execute_query(
                AniListQueries::movies_by_popularity(),
                AniListQueries::page_variables(limit),
            )
            .await?;

        debug!("AniList returned {} movies", page.page.media.len());
        Ok(page
            .page
            .media
            .into_iter()
            .map(AniListMapper::to_movie_entry)
            .collect())
    }
}
