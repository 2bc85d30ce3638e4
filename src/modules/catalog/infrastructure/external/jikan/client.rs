use super::{dto::JikanAnimeListResponse, mapper::JikanMapper};
use crate::modules::catalog::domain::{CatalogEntry, SearchPage};
use crate::modules::catalog::infrastructure::external::common::{CommonHttpHandler, USER_AGENT};
use crate::modules::catalog::traits::SeasonCatalogClient;
use crate::shared::{
    errors::{AppError, AppResult},
    utils::RateLimiter,
};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Jikan returns more than fits the season rail
pub const CURRENT_SEASON_LIMIT: usize = 11;
pub const SEARCH_PAGE_SIZE: u32 = 20;

pub struct JikanClient {
    client: Client,
    base_url: String,
    rate_limiter: Arc<RateLimiter>,
}

impl JikanClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = CommonHttpHandler::create_http_client(timeout, USER_AGENT)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::for_jikan()),
        })
    }

    async fn get_list(
        &self,
        path: &str,
        query: &[(&str, String)],
        operation: &str,
    ) -> AppResult<JikanAnimeListResponse> {
        self.rate_limiter.wait().await;

        let url = format!("{}/{}", self.base_url, path);
        let response =
            CommonHttpHandler::send(self.client.get(&url).query(query), "Jikan", operation).await?;

        response
            .json::<JikanAnimeListResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse Jikan response: {}", e)))
    }
}

#[async_trait]
impl SeasonCatalogClient for JikanClient {
    async fn current_season(&self) -> AppResult<Vec<CatalogEntry>> {
        let response = self.get_list("seasons/now", &[], "current season").await?;

        debug!("Jikan returned {} current-season titles", response.data.len());
        Ok(response
            .data
            .into_iter()
            .take(CURRENT_SEASON_LIMIT)
            .map(JikanMapper::to_catalog_entry)
            .collect())
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let params = [
            ("q", query.trim().to_string()),
            ("limit", SEARCH_PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        let response = self.get_list("anime", &params, "search anime").await?;

        Ok(SearchPage {
            pagination: JikanMapper::to_pagination(response.pagination, page),
            data: response
                .data
                .into_iter()
                .map(JikanMapper::to_catalog_entry)
                .collect(),
        })
    }
}
