use crate::modules::identity::UserIdentity;
use crate::modules::lists::application::invalidation::ViewInvalidator;
use crate::modules::lists::domain::{
    AnimePayload, ItemPatch, List, ListEvent, ListItem, ListRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;
use crate::shared::utils::LogContext;
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated, owner-scoped façade over the list store.
pub struct ListService {
    repo: Arc<dyn ListRepository>,
    invalidator: ViewInvalidator,
}

impl ListService {
    pub fn new(repo: Arc<dyn ListRepository>, invalidator: ViewInvalidator) -> Self {
        Self { repo, invalidator }
    }

    pub fn invalidator(&self) -> &ViewInvalidator {
        &self.invalidator
    }

    fn require_caller(caller: Option<&UserIdentity>) -> AppResult<Uuid> {
        caller
            .map(|user| user.id)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
    }

    /// The list, if it exists and belongs to `owner_id`. Foreign lists look absent.
    async fn owned_list(&self, owner_id: Uuid, list_id: Uuid) -> AppResult<List> {
        self.repo
            .get_list(list_id)
            .await?
            .filter(|list| list.is_owned_by(owner_id))
            .ok_or_else(|| AppError::NotFound(format!("List with ID {} not found", list_id)))
    }

    async fn owned_item(&self, owner_id: Uuid, item_id: Uuid) -> AppResult<ListItem> {
        let not_found = || AppError::NotFound(format!("List item with ID {} not found", item_id));

        let item = self.repo.get_item(item_id).await?.ok_or_else(not_found)?;
        match self.repo.get_list(item.list_id).await? {
            Some(list) if list.is_owned_by(owner_id) => Ok(item),
            _ => Err(not_found()),
        }
    }

    pub async fn get_lists(&self, caller: Option<&UserIdentity>) -> AppResult<Vec<List>> {
        let owner_id = Self::require_caller(caller)?;
        self.repo.get_lists(owner_id).await
    }

    pub async fn get_or_create_default_list(
        &self,
        caller: Option<&UserIdentity>,
    ) -> AppResult<List> {
        let owner_id = Self::require_caller(caller)?;
        self.default_list(owner_id).await
    }

    async fn default_list(&self, owner_id: Uuid) -> AppResult<List> {
        let (list, created) = self.repo.get_or_create_default_list(owner_id).await?;
        if created {
            LogContext::list_mutation("created default list", owner_id, list.id);
            self.invalidator.publish(ListEvent::ListCreated {
                owner_id,
                list_id: list.id,
                title: list.title.clone(),
            });
        }
        Ok(list)
    }

    pub async fn create_list(&self, caller: Option<&UserIdentity>, title: &str) -> AppResult<List> {
        let owner_id = Self::require_caller(caller)?;
        let list = self.repo.create_list(owner_id, title).await?;

        LogContext::list_mutation("created list", owner_id, list.id);
        self.invalidator.publish(ListEvent::ListCreated {
            owner_id,
            list_id: list.id,
            title: list.title.clone(),
        });
        Ok(list)
    }

    pub async fn update_list(
        &self,
        caller: Option<&UserIdentity>,
        list_id: Uuid,
        title: &str,
    ) -> AppResult<List> {
        let owner_id = Self::require_caller(caller)?;
        let list = self.repo.update_list(owner_id, list_id, title).await?;

        self.invalidator.publish(ListEvent::ListUpdated {
            owner_id,
            list_id,
            title: list.title.clone(),
        });
        Ok(list)
    }

    pub async fn delete_list(&self, caller: Option<&UserIdentity>, list_id: Uuid) -> AppResult<()> {
        let owner_id = Self::require_caller(caller)?;
        self.repo.delete_list(owner_id, list_id).await?;

        LogContext::list_mutation("deleted list", owner_id, list_id);
        self.invalidator
            .publish(ListEvent::ListDeleted { owner_id, list_id });
        Ok(())
    }

    pub async fn get_list_items(
        &self,
        caller: Option<&UserIdentity>,
        list_id: Uuid,
    ) -> AppResult<Vec<ListItem>> {
        let owner_id = Self::require_caller(caller)?;
        self.owned_list(owner_id, list_id).await?;
        self.repo.get_list_items(list_id).await
    }

    pub async fn add_list_item(
        &self,
        caller: Option<&UserIdentity>,
        list_id: Uuid,
        anime: AnimePayload,
        position: Option<i32>,
    ) -> AppResult<ListItem> {
        let owner_id = Self::require_caller(caller)?;
        self.owned_list(owner_id, list_id).await?;
        self.insert_item(owner_id, list_id, anime, position).await
    }

    /// Adds to the caller's "My List", creating it on first use.
    pub async fn add_anime_to_default_list(
        &self,
        caller: Option<&UserIdentity>,
        anime: AnimePayload,
    ) -> AppResult<ListItem> {
        let owner_id = Self::require_caller(caller)?;
        let list = self.default_list(owner_id).await?;
        self.insert_item(owner_id, list.id, anime, None).await
    }

    async fn insert_item(
        &self,
        owner_id: Uuid,
        list_id: Uuid,
        anime: AnimePayload,
        position: Option<i32>,
    ) -> AppResult<ListItem> {
        let item = self.repo.add_item(list_id, anime, position).await?;

        log_debug!(
            "Added anime {} to list {} at position {}",
            item.anime_key(),
            list_id,
            item.position
        );
        self.invalidator.publish(ListEvent::ItemAdded {
            owner_id,
            list_id,
            item_id: item.id,
            position: item.position,
        });
        Ok(item)
    }

    pub async fn update_list_item(
        &self,
        caller: Option<&UserIdentity>,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> AppResult<ListItem> {
        let owner_id = Self::require_caller(caller)?;
        self.owned_item(owner_id, item_id).await?;

        let item = self.repo.update_item(item_id, patch).await?;
        self.invalidator.publish(ListEvent::ItemUpdated {
            owner_id,
            list_id: item.list_id,
            item_id,
        });
        Ok(item)
    }

    pub async fn move_list_item(
        &self,
        caller: Option<&UserIdentity>,
        item_id: Uuid,
        new_position: i32,
    ) -> AppResult<ListItem> {
        let owner_id = Self::require_caller(caller)?;
        let current = self.owned_item(owner_id, item_id).await?;

        let moved = self.repo.move_item(item_id, new_position).await?;
        if moved.position != current.position {
            self.invalidator.publish(ListEvent::ItemMoved {
                owner_id,
                list_id: moved.list_id,
                item_id,
                from: current.position,
                to: moved.position,
            });
        }
        Ok(moved)
    }

    pub async fn delete_list_item(
        &self,
        caller: Option<&UserIdentity>,
        item_id: Uuid,
    ) -> AppResult<()> {
        let owner_id = Self::require_caller(caller)?;
        let item = self.owned_item(owner_id, item_id).await?;

        self.repo.delete_item_and_reorder(item_id).await?;
        self.invalidator.publish(ListEvent::ItemRemoved {
            owner_id,
            list_id: item.list_id,
            item_id,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lists::domain::repositories::MockListRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    fn caller() -> UserIdentity {
        UserIdentity::new(Uuid::new_v4())
    }

    fn service(repo: MockListRepository) -> ListService {
        ListService::new(Arc::new(repo), ViewInvalidator::new())
    }

    fn anime(id: i64) -> AnimePayload {
        AnimePayload::new(json!({ "id": id })).unwrap()
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized_without_touching_storage() {
        // No expectations: any repository call would panic
        let service = service(MockListRepository::new());

        let err = service.get_lists(None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = service
            .add_anime_to_default_list(None, anime(42))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn foreign_list_items_are_reported_as_not_found() {
        let stranger = caller();
        let owner = Uuid::new_v4();
        let list = List::new(owner, "Private");
        let list_id = list.id;

        let mut repo = MockListRepository::new();
        repo.expect_get_list()
            .with(eq(list_id))
            .returning(move |_| Ok(Some(list.clone())));
        repo.expect_get_list_items().never();

        let err = service(repo)
            .get_list_items(Some(&stranger), list_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_a_foreign_item_never_reaches_the_store() {
        let stranger = caller();
        let list = List::new(Uuid::new_v4(), "Theirs");
        let item = ListItem::new(list.id, anime(1), 0);
        let item_id = item.id;

        let mut repo = MockListRepository::new();
        repo.expect_get_item()
            .returning(move |_| Ok(Some(item.clone())));
        repo.expect_get_list()
            .returning(move |_| Ok(Some(list.clone())));
        repo.expect_delete_item_and_reorder().never();

        let err = service(repo)
            .delete_list_item(Some(&stranger), item_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_conflicts_propagate_unchanged() {
        let user = caller();
        let default_list = List::new_default(user.id);
        let list_id = default_list.id;

        let mut repo = MockListRepository::new();
        repo.expect_get_or_create_default_list()
            .returning(move |_| Ok((default_list.clone(), false)));
        repo.expect_add_item()
            .withf(move |id, _, position| *id == list_id && position.is_none())
            .returning(|_, _, _| Err(AppError::Conflict("Anime already in your list".into())));

        let service = service(repo);
        let mut events = service.invalidator().subscribe();

        let err = service
            .add_anime_to_default_list(Some(&user), anime(42))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Conflict("Anime already in your list".into()));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn successful_mutations_publish_events() {
        let user = caller();
        let owner_id = user.id;

        let mut repo = MockListRepository::new();
        repo.expect_create_list()
            .with(eq(owner_id), eq("Watching"))
            .returning(|owner, title| Ok(List::new(owner, title)));

        let service = service(repo);
        let mut events = service.invalidator().subscribe();

        let list = service.create_list(Some(&user), "Watching").await.unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            ListEvent::ListCreated {
                owner_id,
                list_id: list.id,
                title: "Watching".to_string(),
            }
        );
    }
}
