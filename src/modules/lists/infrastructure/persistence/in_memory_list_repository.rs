use crate::modules::lists::domain::{
    entities::{AnimePayload, ItemPatch, List, ListItem, DEFAULT_LIST_TITLE},
    repositories::ListRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    lists: Vec<List>,
    items: Vec<ListItem>,
}

impl MemoryState {
    fn default_list_of(&self, owner_id: Uuid) -> Option<&List> {
        self.lists
            .iter()
            .find(|list| list.owner_id == owner_id && list.is_default())
    }

    fn siblings_mut(&mut self, list_id: Uuid) -> impl Iterator<Item = &mut ListItem> {
        self.items.iter_mut().filter(move |item| item.list_id == list_id)
    }

    fn position_taken(&self, list_id: Uuid, position: i32, except: Option<Uuid>) -> bool {
        self.items.iter().any(|item| {
            item.list_id == list_id && item.position == position && Some(item.id) != except
        })
    }

    fn anime_taken(&self, list_id: Uuid, anime_key: &str, except: Option<Uuid>) -> bool {
        self.items.iter().any(|item| {
            item.list_id == list_id && item.anime_key() == anime_key && Some(item.id) != except
        })
    }

    fn item_index(&self, item_id: Uuid) -> AppResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| AppError::NotFound(format!("List item with ID {} not found", item_id)))
    }
}

/// Process-local list store.
///
/// Used when no database is configured, and by tests. Every operation runs
/// under a single async mutex, which gives the same atomicity the PostgreSQL
/// store gets from transactions and constraints.
#[derive(Debug, Default)]
pub struct InMemoryListRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn get_lists(&self, owner_id: Uuid) -> AppResult<Vec<List>> {
        let state = self.state.lock().await;
        let mut lists: Vec<List> = state
            .lists
            .iter()
            .filter(|list| list.owner_id == owner_id)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn get_or_create_default_list(&self, owner_id: Uuid) -> AppResult<(List, bool)> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.default_list_of(owner_id) {
            return Ok((existing.clone(), false));
        }

        let list = List::new_default(owner_id);
        state.lists.push(list.clone());
        Ok((list, true))
    }

    async fn create_list(&self, owner_id: Uuid, title: &str) -> AppResult<List> {
        Validator::validate_list_title(title)?;

        let mut state = self.state.lock().await;
        if title == DEFAULT_LIST_TITLE && state.default_list_of(owner_id).is_some() {
            return Err(AppError::Conflict(format!(
                "A list titled '{}' already exists",
                DEFAULT_LIST_TITLE
            )));
        }

        let list = List::new(owner_id, title);
        state.lists.push(list.clone());
        Ok(list)
    }

    async fn update_list(&self, owner_id: Uuid, list_id: Uuid, title: &str) -> AppResult<List> {
        Validator::validate_list_title(title)?;

        let mut state = self.state.lock().await;
        let index = state
            .lists
            .iter()
            .position(|list| list.id == list_id && list.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("List with ID {} not found", list_id)))?;

        if title == DEFAULT_LIST_TITLE {
            if let Some(existing) = state.default_list_of(owner_id) {
                if existing.id != list_id {
                    return Err(AppError::Conflict(format!(
                        "A list titled '{}' already exists",
                        DEFAULT_LIST_TITLE
                    )));
                }
            }
        }

        state.lists[index].rename(title);
        Ok(state.lists[index].clone())
    }

    async fn delete_list(&self, owner_id: Uuid, list_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let index = state
            .lists
            .iter()
            .position(|list| list.id == list_id && list.owner_id == owner_id)
            .ok_or_else(|| AppError::NotFound(format!("List with ID {} not found", list_id)))?;

        state.lists.remove(index);
        state.items.retain(|item| item.list_id != list_id);
        Ok(())
    }

    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        let state = self.state.lock().await;
        Ok(state.lists.iter().find(|list| list.id == list_id).cloned())
    }

    async fn get_list_items(&self, list_id: Uuid) -> AppResult<Vec<ListItem>> {
        let state = self.state.lock().await;
        let mut items: Vec<ListItem> = state
            .items
            .iter()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn get_item(&self, item_id: Uuid) -> AppResult<Option<ListItem>> {
        let state = self.state.lock().await;
        Ok(state.items.iter().find(|item| item.id == item_id).cloned())
    }

    async fn add_item(
        &self,
        list_id: Uuid,
        anime: AnimePayload,
        position: Option<i32>,
    ) -> AppResult<ListItem> {
        let mut state = self.state.lock().await;
        if !state.lists.iter().any(|list| list.id == list_id) {
            return Err(AppError::NotFound(format!("List with ID {} not found", list_id)));
        }

        if state.anime_taken(list_id, &anime.anime_key(), None) {
            return Err(AppError::Conflict("Anime already in your list".to_string()));
        }

        let position = match position {
            Some(position) => {
                Validator::validate_position(position)?;
                if state.position_taken(list_id, position, None) {
                    return Err(AppError::Conflict(format!(
                        "Position {} is already taken in this list",
                        position
                    )));
                }
                position
            }
            None => state
                .items
                .iter()
                .filter(|item| item.list_id == list_id)
                .map(|item| item.position)
                .max()
                .map_or(0, |max| max + 1),
        };

        let item = ListItem::new(list_id, anime, position);
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, item_id: Uuid, patch: ItemPatch) -> AppResult<ListItem> {
        let mut state = self.state.lock().await;
        let index = state.item_index(item_id)?;
        let list_id = state.items[index].list_id;

        if let Some(anime) = &patch.anime {
            if state.anime_taken(list_id, &anime.anime_key(), Some(item_id)) {
                return Err(AppError::Conflict("Anime already in your list".to_string()));
            }
        }
        if let Some(position) = patch.position {
            Validator::validate_position(position)?;
            if state.position_taken(list_id, position, Some(item_id)) {
                return Err(AppError::Conflict(format!(
                    "Position {} is already taken in this list",
                    position
                )));
            }
        }

        let item = &mut state.items[index];
        if let Some(anime) = patch.anime {
            item.anime = anime;
        }
        if let Some(position) = patch.position {
            item.position = position;
        }
        Ok(item.clone())
    }

    async fn move_item(&self, item_id: Uuid, new_position: i32) -> AppResult<ListItem> {
        Validator::validate_position(new_position)?;

        let mut state = self.state.lock().await;
        let index = state.item_index(item_id)?;
        let list_id = state.items[index].list_id;
        let from = state.items[index].position;

        let count = state.items.iter().filter(|item| item.list_id == list_id).count() as i32;
        let to = new_position.min(count - 1);
        if to == from {
            return Ok(state.items[index].clone());
        }

        for sibling in state.siblings_mut(list_id) {
            if sibling.id == item_id {
                sibling.position = to;
            } else if from < to && sibling.position > from && sibling.position <= to {
                sibling.position -= 1;
            } else if from > to && sibling.position >= to && sibling.position < from {
                sibling.position += 1;
            }
        }

        Ok(state.items[index].clone())
    }

    async fn delete_item_and_reorder(&self, item_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let index = state.item_index(item_id)?;
        let removed = state.items.remove(index);

        for sibling in state.siblings_mut(removed.list_id) {
            if sibling.position > removed.position {
                sibling.position -= 1;
            }
        }
        Ok(())
    }
}
