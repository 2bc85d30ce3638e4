use crate::modules::catalog::domain::{CatalogEntry, MovieEntry, SearchPage};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Popularity-ranked catalog queries (AniList).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiringCatalogClient: Send + Sync {
    /// Currently releasing anime, most popular first
    async fn releasing_by_popularity(&self, limit: u32) -> AppResult<Vec<CatalogEntry>>;

    async fn movies_by_popularity(&self, limit: u32) -> AppResult<Vec<MovieEntry>>;
}

/// Season listings and free-text search (Jikan).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeasonCatalogClient: Send + Sync {
    async fn current_season(&self) -> AppResult<Vec<CatalogEntry>>;

    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage>;
}
