use crate::modules::catalog::domain::{AiringFeed, MovieEntry, SearchPage};
use crate::modules::catalog::traits::{AiringCatalogClient, SeasonCatalogClient};
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation, Validator};
use crate::log_info;
use std::sync::Arc;

pub const TOP_AIRING_LIMIT: u32 = 10;
pub const MOVIES_LIMIT: u32 = 20;

/// Normalized access to the public anime catalogs.
///
/// Every operation is all-or-nothing: one failing upstream fails the whole call
/// with `Upstream`, and nothing partial is returned.
pub struct MetadataGateway {
    anilist: Arc<dyn AiringCatalogClient>,
    jikan: Arc<dyn SeasonCatalogClient>,
}

impl MetadataGateway {
    pub fn new(anilist: Arc<dyn AiringCatalogClient>, jikan: Arc<dyn SeasonCatalogClient>) -> Self {
        Self { anilist, jikan }
    }

    /// Top releasing titles and the current season, requested concurrently.
    pub async fn fetch_top_airing(&self) -> AppResult<AiringFeed> {
        let timer = TimedOperation::new("fetch_top_airing");

        let (top_airing, current_season) = tokio::try_join!(
            self.anilist.releasing_by_popularity(TOP_AIRING_LIMIT),
            self.jikan.current_season(),
        )
        .inspect_err(|e| LogContext::upstream_failure("catalog", "airing feed", e))?;

        timer.finish_with_info(&format!(
            "{} airing, {} this season",
            top_airing.len(),
            current_season.len()
        ));
        Ok(AiringFeed {
            top_airing,
            current_season,
        })
    }

    pub async fn fetch_movies(&self) -> AppResult<Vec<MovieEntry>> {
        let timer = TimedOperation::new("fetch_movies");

        let movies = self
            .anilist
            .movies_by_popularity(MOVIES_LIMIT)
            .await
            .inspect_err(|e| LogContext::upstream_failure("anilist", "movies", e))?;

        timer.finish_with_info(&format!("{} movies", movies.len()));
        Ok(movies)
    }

    pub async fn search_anime(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        Validator::validate_search_query(query)?;
        Validator::validate_page(page)?;

        let query = query.trim();
        LogContext::search_operation(query, Some("jikan"), None);

        let results = self.jikan.search(query, page).await?;

        LogContext::search_operation(query, Some("jikan"), Some(results.data.len()));
        if results.pagination.has_next_page {
            log_info!(
                "Search '{}' has more pages after {}",
                query,
                results.pagination.current_page
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::{CatalogEntry, SearchPage};
    use crate::modules::catalog::traits::{MockAiringCatalogClient, MockSeasonCatalogClient};
    use crate::shared::errors::AppError;
    use mockall::predicate::eq;

    fn entry(id: i64, title: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            cover_image: None,
            score: None,
            year: None,
            kind: None,
            airing: None,
        }
    }

    #[tokio::test]
    async fn airing_feed_combines_both_rails() {
        let mut anilist = MockAiringCatalogClient::new();
        anilist
            .expect_releasing_by_popularity()
            .with(eq(TOP_AIRING_LIMIT))
            .returning(|_| Ok(vec![entry(21, "ONE PIECE")]));
        let mut jikan = MockSeasonCatalogClient::new();
        jikan
            .expect_current_season()
            .returning(|| Ok(vec![entry(1, "A"), entry(2, "B")]));

        let gateway = MetadataGateway::new(Arc::new(anilist), Arc::new(jikan));
        let feed = gateway.fetch_top_airing().await.unwrap();

        assert_eq!(feed.top_airing.len(), 1);
        assert_eq!(feed.current_season.len(), 2);
    }

    #[tokio::test]
    async fn one_failing_upstream_fails_the_feed() {
        let mut anilist = MockAiringCatalogClient::new();
        anilist
            .expect_releasing_by_popularity()
            .returning(|_| Ok(vec![entry(21, "ONE PIECE")]));
        let mut jikan = MockSeasonCatalogClient::new();
        jikan
            .expect_current_season()
            .returning(|| Err(AppError::Upstream("Jikan service unavailable".into())));

        let gateway = MetadataGateway::new(Arc::new(anilist), Arc::new(jikan));
        let err = gateway.fetch_top_airing().await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn blank_search_is_rejected_before_any_request() {
        let anilist = MockAiringCatalogClient::new();
        let mut jikan = MockSeasonCatalogClient::new();
        jikan.expect_search().never();

        let gateway = MetadataGateway::new(Arc::new(anilist), Arc::new(jikan));
        let err = gateway.search_anime("   ", 1).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn search_trims_the_query() {
        let anilist = MockAiringCatalogClient::new();
        let mut jikan = MockSeasonCatalogClient::new();
        jikan
            .expect_search()
            .with(eq("naruto"), eq(2))
            .returning(|_, page| Ok(SearchPage::empty(page)));

        let gateway = MetadataGateway::new(Arc::new(anilist), Arc::new(jikan));
        let page = gateway.search_anime("  naruto ", 2).await.unwrap();

        assert_eq!(page.pagination.current_page, 2);
    }
}
