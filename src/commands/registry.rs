use crate::modules::{catalog, lists, search};
use crate::shared::infrastructure::database::PoolStatus;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStatus>,
}

/// Single place where every module's routes are mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(lists::commands::router())
        .merge(catalog::commands::router())
        .merge(search::commands::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer())
        .with_state(state)
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match &state.database {
        Some(db) => HealthResponse {
            status: "ok",
            storage: "postgres",
            pool: Some(db.pool_status()),
        },
        None => HealthResponse {
            status: "ok",
            storage: "memory",
            pool: None,
        },
    };
    Json(response)
}
