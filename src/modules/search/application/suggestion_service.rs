use super::session::{SuggestionSession, DEFAULT_DEBOUNCE};
use crate::modules::catalog::{CatalogEntry, MetadataGateway};
use crate::modules::search::domain::SuggestionCache;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, Validator};
use std::sync::Arc;
use std::time::Duration;

pub type Suggestions = Vec<CatalogEntry>;

/// Cache-first search suggestions. A miss fetches the first search page and
/// caches its entries; failures are never cached.
pub struct SuggestionService {
    cache: Arc<SuggestionCache<Suggestions>>,
    gateway: Arc<MetadataGateway>,
    ttl: Duration,
    debounce: Duration,
}

impl SuggestionService {
    pub fn new(
        cache: Arc<SuggestionCache<Suggestions>>,
        gateway: Arc<MetadataGateway>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            gateway,
            ttl,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// A debounced session for one input field, sharing this service's cache.
    pub fn session(self: &Arc<Self>) -> SuggestionSession {
        SuggestionSession::new(Arc::clone(self), self.debounce)
    }

    pub fn lookup_suggestion(&self, query: &str) -> Option<Suggestions> {
        self.cache.lookup(query)
    }

    pub fn store_suggestion(&self, query: &str, results: Suggestions) {
        self.cache.store(query, results, self.ttl);
    }

    pub async fn suggest(&self, query: &str) -> AppResult<Suggestions> {
        Validator::validate_search_query(query)?;

        let cached = self.lookup_suggestion(query);
        LogContext::cache_lookup(query, cached.is_some(), self.cache.len());
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let page = self.gateway.search_anime(query, 1).await?;
        self.store_suggestion(query, page.data.clone());
        Ok(page.data)
    }

    pub fn cache(&self) -> &SuggestionCache<Suggestions> {
        &self.cache
    }
}
