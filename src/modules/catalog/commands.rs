use super::application::MetadataGateway;
use super::domain::{AiringFeed, MovieEntry, SearchPage};
use crate::shared::errors::AppResult;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/all-anime-data", get(fetch_top_airing))
        .route("/api/movies", get(fetch_movies))
        .route("/api/search", get(search_anime))
}

pub async fn fetch_top_airing(
    State(gateway): State<Arc<MetadataGateway>>,
) -> AppResult<Json<AiringFeed>> {
    let feed = gateway.fetch_top_airing().await?;
    Ok(Json(feed))
}

pub async fn fetch_movies(
    State(gateway): State<Arc<MetadataGateway>>,
) -> AppResult<Json<Vec<MovieEntry>>> {
    let movies = gateway.fetch_movies().await?;
    Ok(Json(movies))
}

pub async fn search_anime(
    State(gateway): State<Arc<MetadataGateway>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchPage>> {
    let page = gateway.search_anime(&params.q, params.page).await?;
    Ok(Json(page))
}
