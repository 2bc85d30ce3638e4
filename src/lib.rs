pub mod commands;
pub mod modules;
mod schema;
pub mod shared;
pub mod state;

use modules::{
    catalog::{AniListClient, JikanClient, MetadataGateway},
    identity::{AnonymousIdentityProvider, IdentityProvider, SupabaseIdentityProvider},
    lists::{InMemoryListRepository, ListRepository, ListRepositoryImpl, ListService, ViewInvalidator},
    search::{SuggestionCache, SuggestionService},
};
use shared::errors::{AppError, AppResult};
use shared::{AppConfig, Database};
use state::AppState;
use std::sync::Arc;

pub use commands::build_router;

/// Connect and migrate, off the async runtime. Any failure means "no database".
async fn connect_database(database_url: String) -> AppResult<Arc<Database>> {
    tokio::task::spawn_blocking(move || {
        let database = Database::connect(&database_url)?;
        database.run_migrations()?;
        Ok(Arc::new(database))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Database setup task failed: {}", e)))?
}

async fn build_list_store(
    config: &AppConfig,
) -> (Arc<dyn ListRepository>, Option<Arc<Database>>) {
    let Some(url) = config.database_url.clone() else {
        log_warn!("DATABASE_URL not set - lists are kept in memory and lost on restart");
        return (Arc::new(InMemoryListRepository::new()), None);
    };

    match connect_database(url).await {
        Ok(database) => {
            log_info!("Using PostgreSQL list store");
            (
                Arc::new(ListRepositoryImpl::new(Arc::clone(&database))),
                Some(database),
            )
        }
        Err(e) => {
            log_error!("Database unavailable during startup: {}", e);
            log_warn!("Falling back to the in-memory list store");
            (Arc::new(InMemoryListRepository::new()), None)
        }
    }
}

fn build_identity_provider(config: &AppConfig) -> AppResult<Arc<dyn IdentityProvider>> {
    match &config.auth_url {
        Some(url) => Ok(Arc::new(SupabaseIdentityProvider::new(
            url,
            &config.auth_api_key,
            config.http_timeout,
        )?)),
        None => {
            log_warn!("AUTH_URL not set - every request is treated as signed out");
            Ok(Arc::new(AnonymousIdentityProvider))
        }
    }
}

/// Wire repositories, upstream clients and services into the shared state.
pub async fn build_state(config: &AppConfig) -> AppResult<AppState> {
    let (repo, database) = build_list_store(config).await;

    let anilist = Arc::new(AniListClient::new(&config.anilist_url, config.http_timeout)?);
    let jikan = Arc::new(JikanClient::new(&config.jikan_url, config.http_timeout)?);
    let gateway = Arc::new(MetadataGateway::new(anilist, jikan));

    let cache = Arc::new(SuggestionCache::new(config.suggestion_capacity));
    let suggestions = Arc::new(
        SuggestionService::new(cache, Arc::clone(&gateway), config.suggestion_ttl)
            .with_debounce(config.suggestion_debounce),
    );

    let lists = Arc::new(ListService::new(repo, ViewInvalidator::new()));

    Ok(AppState {
        lists,
        gateway,
        suggestions,
        identity: build_identity_provider(config)?,
        database,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log_info!("Shutdown signal received");
}

pub async fn run(config: AppConfig) -> AppResult<()> {
    let state = build_state(&config).await?;
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", address, e)))?;
    log_info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))
}
