use super::application::ListService;
use super::domain::{AnimePayload, ItemPatch, List, ListItem};
use crate::log_debug;
use crate::modules::identity::CurrentUser;
use crate::shared::errors::AppResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListRequest {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddListItemRequest {
    pub anime: AnimePayload,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToDefaultListRequest {
    pub anime: AnimePayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveListItemRequest {
    pub position: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/lists", get(get_lists).post(create_list))
        .route("/api/lists/default", get(get_or_create_default_list))
        .route("/api/lists/default/items", post(add_anime_to_default_list))
        .route("/api/lists/{id}", patch(update_list).delete(delete_list))
        .route("/api/lists/{id}/items", get(get_list_items).post(add_list_item))
        .route(
            "/api/items/{id}",
            patch(update_list_item).delete(delete_list_item),
        )
        .route("/api/items/{id}/move", post(move_list_item))
}

pub async fn get_lists(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
) -> AppResult<Json<Vec<List>>> {
    let lists = lists.get_lists(user.identity()).await?;
    Ok(Json(lists))
}

pub async fn get_or_create_default_list(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
) -> AppResult<Json<List>> {
    let list = lists.get_or_create_default_list(user.identity()).await?;
    Ok(Json(list))
}

pub async fn create_list(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Json(request): Json<CreateListRequest>,
) -> AppResult<(StatusCode, Json<List>)> {
    log_debug!("Creating list: {}", request.title);
    let list = lists.create_list(user.identity(), &request.title).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn update_list(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<UpdateListRequest>,
) -> AppResult<Json<List>> {
    let list = lists
        .update_list(user.identity(), list_id, &request.title)
        .await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    lists.delete_list(user.identity(), list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_list_items(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
) -> AppResult<Json<Vec<ListItem>>> {
    let items = lists.get_list_items(user.identity(), list_id).await?;
    Ok(Json(items))
}

pub async fn add_list_item(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(request): Json<AddListItemRequest>,
) -> AppResult<(StatusCode, Json<ListItem>)> {
    let item = lists
        .add_list_item(user.identity(), list_id, request.anime, request.position)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn add_anime_to_default_list(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Json(request): Json<AddToDefaultListRequest>,
) -> AppResult<(StatusCode, Json<ListItem>)> {
    log_debug!("Adding anime {} to default list", request.anime.anime_key());
    let item = lists
        .add_anime_to_default_list(user.identity(), request.anime)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_list_item(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(patch): Json<ItemPatch>,
) -> AppResult<Json<ListItem>> {
    let item = lists.update_list_item(user.identity(), item_id, patch).await?;
    Ok(Json(item))
}

pub async fn move_list_item(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(request): Json<MoveListItemRequest>,
) -> AppResult<Json<ListItem>> {
    let item = lists
        .move_list_item(user.identity(), item_id, request.position)
        .await?;
    Ok(Json(item))
}

pub async fn delete_list_item(
    State(lists): State<Arc<ListService>>,
    user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    lists.delete_list_item(user.identity(), item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
