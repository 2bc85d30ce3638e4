use crate::modules::lists::domain::entities::{AnimePayload, ItemPatch, List, ListItem};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable storage for lists and their items.
///
/// Implementations own the list invariants: one default list per owner, unique
/// `anime.id` per list, unique non-negative positions per list, and gap-free
/// renumbering when an item is deleted or moved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Lists owned by `owner_id`, newest first
    async fn get_lists(&self, owner_id: Uuid) -> AppResult<Vec<List>>;

    /// Find the owner's default list or create it; concurrent callers get the same row.
    /// The flag is `true` only for the call that inserted it.
    async fn get_or_create_default_list(&self, owner_id: Uuid) -> AppResult<(List, bool)>;

    async fn create_list(&self, owner_id: Uuid, title: &str) -> AppResult<List>;

    /// Fails with `NotFound` unless `list_id` belongs to `owner_id`
    async fn update_list(&self, owner_id: Uuid, list_id: Uuid, title: &str) -> AppResult<List>;

    /// Deletes the list and all of its items in one transaction
    async fn delete_list(&self, owner_id: Uuid, list_id: Uuid) -> AppResult<()>;

    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>>;

    /// Items ordered by position, then creation time
    async fn get_list_items(&self, list_id: Uuid) -> AppResult<Vec<ListItem>>;

    async fn get_item(&self, item_id: Uuid) -> AppResult<Option<ListItem>>;

    /// Appends after the current last position when `position` is `None`
    async fn add_item(
        &self,
        list_id: Uuid,
        anime: AnimePayload,
        position: Option<i32>,
    ) -> AppResult<ListItem>;

    async fn update_item(&self, item_id: Uuid, patch: ItemPatch) -> AppResult<ListItem>;

    /// Moves an item and shifts the siblings in between; target clamped to the list bounds
    async fn move_item(&self, item_id: Uuid, new_position: i32) -> AppResult<ListItem>;

    /// Deletes an item and closes the gap it leaves, atomically
    async fn delete_item_and_reorder(&self, item_id: Uuid) -> AppResult<()>;
}
