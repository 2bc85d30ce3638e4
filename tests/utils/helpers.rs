/// Test helper functions, fakes and service builders
use anishelf_lib::modules::catalog::{
    AiringCatalogClient, CatalogEntry, MetadataGateway, MovieEntry, SearchPage, SeasonCatalogClient,
};
use anishelf_lib::modules::identity::{IdentityProvider, UserIdentity};
use anishelf_lib::modules::lists::{InMemoryListRepository, ListService, ViewInvalidator};
use anishelf_lib::modules::search::{SuggestionCache, SuggestionService};
use anishelf_lib::shared::errors::AppResult;
use anishelf_lib::state::AppState;
use async_trait::async_trait;
use mockall::mock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub AniList {}

    #[async_trait]
    impl AiringCatalogClient for AniList {
        async fn releasing_by_popularity(&self, limit: u32) -> AppResult<Vec<CatalogEntry>>;
        async fn movies_by_popularity(&self, limit: u32) -> AppResult<Vec<MovieEntry>>;
    }
}

mock! {
    pub Jikan {}

    #[async_trait]
    impl SeasonCatalogClient for Jikan {
        async fn current_season(&self) -> AppResult<Vec<CatalogEntry>>;
        async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage>;
    }
}

/// Identity provider backed by a fixed token table
#[derive(Default)]
pub struct StaticIdentityProvider {
    users: HashMap<String, UserIdentity>,
}

impl StaticIdentityProvider {
    pub fn with_user(mut self, token: &str, user: UserIdentity) -> Self {
        self.users.insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self, token: &str) -> AppResult<Option<UserIdentity>> {
        Ok(self.users.get(token).cloned())
    }
}

pub struct TestLists {
    pub service: Arc<ListService>,
    pub repo: Arc<InMemoryListRepository>,
}

pub fn build_list_service() -> TestLists {
    let repo = Arc::new(InMemoryListRepository::new());
    let service = Arc::new(ListService::new(repo.clone(), ViewInvalidator::new()));
    TestLists { service, repo }
}

pub fn build_gateway(anilist: MockAniList, jikan: MockJikan) -> Arc<MetadataGateway> {
    Arc::new(MetadataGateway::new(Arc::new(anilist), Arc::new(jikan)))
}

pub fn build_suggestion_service(
    gateway: Arc<MetadataGateway>,
    capacity: usize,
    ttl: Duration,
) -> Arc<SuggestionService> {
    Arc::new(SuggestionService::new(
        Arc::new(SuggestionCache::new(capacity)),
        gateway,
        ttl,
    ))
}

/// Full application state on the in-memory store with mocked upstreams
pub fn build_test_state(
    anilist: MockAniList,
    jikan: MockJikan,
    identity: StaticIdentityProvider,
) -> AppState {
    let gateway = build_gateway(anilist, jikan);
    AppState {
        lists: build_list_service().service,
        suggestions: build_suggestion_service(gateway.clone(), 100, Duration::from_secs(300)),
        gateway,
        identity: Arc::new(identity),
        database: None,
    }
}
