use crate::modules::catalog::MetadataGateway;
use crate::modules::identity::IdentityProvider;
use crate::modules::lists::ListService;
use crate::modules::search::SuggestionService;
use crate::shared::Database;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared handles injected into every handler. Cheap to clone.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub lists: Arc<ListService>,
    pub gateway: Arc<MetadataGateway>,
    pub suggestions: Arc<SuggestionService>,
    pub identity: Arc<dyn IdentityProvider>,
    /// `None` when running on the in-memory list store
    pub database: Option<Arc<Database>>,
}
