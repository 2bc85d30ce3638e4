use super::application::{SuggestionService, Suggestions};
use crate::shared::errors::AppResult;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionParams {
    pub q: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/suggestions", get(get_suggestions))
}

/// Debouncing happens client-side; this endpoint is the cached lookup behind it.
pub async fn get_suggestions(
    State(suggestions): State<Arc<SuggestionService>>,
    Query(params): Query<SuggestionParams>,
) -> AppResult<Json<Suggestions>> {
    let results = suggestions.suggest(&params.q).await?;
    Ok(Json(results))
}
