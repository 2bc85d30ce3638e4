use crate::modules::lists::domain::{
    entities::{AnimePayload, ItemPatch, List, ListItem, DEFAULT_LIST_TITLE},
    repositories::ListRepository,
};
use crate::modules::lists::infrastructure::models::{
    ListItemChangeset, ListItemModel, ListModel, NewList, NewListItem,
};
use crate::schema::{list_items, lists};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::Database;
use crate::shared::utils::{LogContext, Validator};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Bool, Text, Uuid as SqlUuid};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

const ANIME_UNIQUE_CONSTRAINT: &str = "uq_list_items_anime";
const POSITION_UNIQUE_CONSTRAINT: &str = "uq_list_items_position";

#[derive(QueryableByName)]
struct DeleteResult {
    #[diesel(sql_type = Bool)]
    deleted: bool,
}

/// Translate unique violations on list items into user-facing conflicts.
fn item_conflict(err: DieselError) -> AppError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        match info.constraint_name() {
            Some(ANIME_UNIQUE_CONSTRAINT) => {
                return AppError::Conflict("Anime already in your list".to_string())
            }
            Some(POSITION_UNIQUE_CONSTRAINT) => {
                return AppError::Conflict("Position is already taken in this list".to_string())
            }
            _ => {}
        }
    }
    AppError::from(err)
}

fn list_not_found(list_id: Uuid) -> AppError {
    AppError::NotFound(format!("List with ID {} not found", list_id))
}

fn item_not_found(item_id: Uuid) -> AppError {
    AppError::NotFound(format!("List item with ID {} not found", item_id))
}

/// PostgreSQL-backed list store.
///
/// Uniqueness is enforced by the schema (see migrations): a partial unique index
/// for the default list, `(list_id, anime->>'id')` for duplicates, and a deferred
/// `(list_id, position)` constraint so block shifts can run as one statement.
pub struct ListRepositoryImpl {
    db: Arc<Database>,
}

impl ListRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Run a blocking diesel operation on the blocking pool.
    async fn with_conn<T, F>(&self, operation: &'static str, op: F) -> AppResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let start = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            op(&mut conn)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Database task failed: {}", e)))?;

        LogContext::db_operation(operation, "lists", Some(start.elapsed().as_millis() as u64));
        result
    }
}

#[async_trait]
impl ListRepository for ListRepositoryImpl {
    async fn get_lists(&self, owner_id: Uuid) -> AppResult<Vec<List>> {
        self.with_conn("get_lists", move |conn| {
            let models = lists::table
                .filter(lists::owner_id.eq(owner_id))
                .order(lists::created_at.desc())
                .select(ListModel::as_select())
                .load(conn)?;
            Ok(models.into_iter().map(List::from).collect())
        })
        .await
    }

    async fn get_or_create_default_list(&self, owner_id: Uuid) -> AppResult<(List, bool)> {
        self.with_conn("get_or_create_default_list", move |conn| {
            // The WHERE clause must match the predicate of uq_lists_default_per_owner
            let inserted = diesel::sql_query(
                "INSERT INTO lists (id, owner_id, title)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (owner_id) WHERE title = 'My List' DO NOTHING",
            )
            .bind::<SqlUuid, _>(Uuid::new_v4())
            .bind::<SqlUuid, _>(owner_id)
            .bind::<Text, _>(DEFAULT_LIST_TITLE)
            .execute(conn)?;

            let model = lists::table
                .filter(lists::owner_id.eq(owner_id))
                .filter(lists::title.eq(DEFAULT_LIST_TITLE))
                .select(ListModel::as_select())
                .first(conn)?;
            Ok((List::from(model), inserted == 1))
        })
        .await
    }

    async fn create_list(&self, owner_id: Uuid, title: &str) -> AppResult<List> {
        Validator::validate_list_title(title)?;
        let title = title.to_string();

        self.with_conn("create_list", move |conn| {
            let model = diesel::insert_into(lists::table)
                .values(&NewList {
                    id: Uuid::new_v4(),
                    owner_id,
                    title: &title,
                })
                .returning(ListModel::as_returning())
                .get_result(conn)?;
            Ok(List::from(model))
        })
        .await
    }

    async fn update_list(&self, owner_id: Uuid, list_id: Uuid, title: &str) -> AppResult<List> {
        Validator::validate_list_title(title)?;
        let title = title.to_string();

        self.with_conn("update_list", move |conn| {
            let model = diesel::update(
                lists::table
                    .filter(lists::id.eq(list_id))
                    .filter(lists::owner_id.eq(owner_id)),
            )
            .set(lists::title.eq(&title))
            .returning(ListModel::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| list_not_found(list_id))?;
            Ok(List::from(model))
        })
        .await
    }

    async fn delete_list(&self, owner_id: Uuid, list_id: Uuid) -> AppResult<()> {
        self.with_conn("delete_list", move |conn| {
            conn.transaction::<_, AppError, _>(|conn| {
                let owned = lists::table
                    .filter(lists::id.eq(list_id))
                    .filter(lists::owner_id.eq(owner_id))
                    .select(lists::id)
                    .for_update()
                    .first::<Uuid>(conn)
                    .optional()?;
                if owned.is_none() {
                    return Err(list_not_found(list_id));
                }

                diesel::delete(list_items::table.filter(list_items::list_id.eq(list_id)))
                    .execute(conn)?;
                diesel::delete(lists::table.find(list_id)).execute(conn)?;
                Ok(())
            })
        })
        .await
    }

    async fn get_list(&self, list_id: Uuid) -> AppResult<Option<List>> {
        self.with_conn("get_list", move |conn| {
            let model = lists::table
                .find(list_id)
                .select(ListModel::as_select())
                .first(conn)
                .optional()?;
            Ok(model.map(List::from))
        })
        .await
    }

    async fn get_list_items(&self, list_id: Uuid) -> AppResult<Vec<ListItem>> {
        self.with_conn("get_list_items", move |conn| {
            list_items::table
                .filter(list_items::list_id.eq(list_id))
                .order((list_items::position.asc(), list_items::created_at.asc()))
                .select(ListItemModel::as_select())
                .load(conn)?
                .into_iter()
                .map(ListItemModel::into_domain)
                .collect()
        })
        .await
    }

    async fn get_item(&self, item_id: Uuid) -> AppResult<Option<ListItem>> {
        self.with_conn("get_item", move |conn| {
            list_items::table
                .find(item_id)
                .select(ListItemModel::as_select())
                .first(conn)
                .optional()?
                .map(ListItemModel::into_domain)
                .transpose()
        })
        .await
    }

    async fn add_item(
        &self,
        list_id: Uuid,
        anime: AnimePayload,
        position: Option<i32>,
    ) -> AppResult<ListItem> {
        if let Some(position) = position {
            Validator::validate_position(position)?;
        }

        self.with_conn("add_item", move |conn| {
            conn.transaction::<_, DieselError, _>(|conn| {
                // Lock the parent row so concurrent appends compute distinct positions
                lists::table
                    .find(list_id)
                    .select(lists::id)
                    .for_update()
                    .first::<Uuid>(conn)?;

                let position = match position {
                    Some(position) => position,
                    None => list_items::table
                        .filter(list_items::list_id.eq(list_id))
                        .select(diesel::dsl::max(list_items::position))
                        .first::<Option<i32>>(conn)?
                        .map_or(0, |max| max + 1),
                };

                diesel::insert_into(list_items::table)
                    .values(&NewListItem {
                        id: Uuid::new_v4(),
                        list_id,
                        anime: anime.into_value(),
                        position,
                    })
                    .returning(ListItemModel::as_returning())
                    .get_result(conn)
            })
            .map_err(|e| match e {
                DieselError::NotFound => list_not_found(list_id),
                other => item_conflict(other),
            })?
            .into_domain()
        })
        .await
    }

    async fn update_item(&self, item_id: Uuid, patch: ItemPatch) -> AppResult<ListItem> {
        if let Some(position) = patch.position {
            Validator::validate_position(position)?;
        }

        self.with_conn("update_item", move |conn| {
            if patch.is_empty() {
                return list_items::table
                    .find(item_id)
                    .select(ListItemModel::as_select())
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| item_not_found(item_id))?
                    .into_domain();
            }

            let changeset = ListItemChangeset {
                anime: patch.anime.map(AnimePayload::into_value),
                position: patch.position,
            };

            conn.transaction::<_, DieselError, _>(|conn| {
                diesel::update(list_items::table.find(item_id))
                    .set(&changeset)
                    .returning(ListItemModel::as_returning())
                    .get_result(conn)
            })
            .map_err(|e| match e {
                DieselError::NotFound => item_not_found(item_id),
                other => item_conflict(other),
            })?
            .into_domain()
        })
        .await
    }

    async fn move_item(&self, item_id: Uuid, new_position: i32) -> AppResult<ListItem> {
        Validator::validate_position(new_position)?;

        self.with_conn("move_item", move |conn| {
            conn.transaction::<_, AppError, _>(|conn| {
                let list_id = list_items::table
                    .find(item_id)
                    .select(list_items::list_id)
                    .first::<Uuid>(conn)
                    .optional()?
                    .ok_or_else(|| item_not_found(item_id))?;

                // Serialize reorders within one list before reading the position
                lists::table
                    .find(list_id)
                    .select(lists::id)
                    .for_update()
                    .first::<Uuid>(conn)?;

                let item = list_items::table
                    .find(item_id)
                    .select(ListItemModel::as_select())
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| item_not_found(item_id))?;

                let count: i64 = list_items::table
                    .filter(list_items::list_id.eq(item.list_id))
                    .count()
                    .get_result(conn)?;
                let from = item.position;
                let to = new_position.min(count as i32 - 1);
                if to == from {
                    return item.into_domain();
                }

                let siblings = list_items::table
                    .filter(list_items::list_id.eq(item.list_id))
                    .filter(list_items::id.ne(item_id));
                if from < to {
                    diesel::update(
                        siblings
                            .filter(list_items::position.gt(from))
                            .filter(list_items::position.le(to)),
                    )
                    .set(list_items::position.eq(list_items::position - 1))
                    .execute(conn)?;
                } else {
                    diesel::update(
                        siblings
                            .filter(list_items::position.ge(to))
                            .filter(list_items::position.lt(from)),
                    )
                    .set(list_items::position.eq(list_items::position + 1))
                    .execute(conn)?;
                }

                diesel::update(list_items::table.find(item_id))
                    .set(list_items::position.eq(to))
                    .returning(ListItemModel::as_returning())
                    .get_result(conn)?
                    .into_domain()
            })
        })
        .await
    }

    async fn delete_item_and_reorder(&self, item_id: Uuid) -> AppResult<()> {
        self.with_conn("delete_item_and_reorder", move |conn| {
            // Delete and renumber happen inside one server-side function call
            let result: DeleteResult =
                diesel::sql_query("SELECT delete_list_item_and_reorder($1) AS deleted")
                    .bind::<SqlUuid, _>(item_id)
                    .get_result(conn)?;

            if result.deleted {
                Ok(())
            } else {
                Err(item_not_found(item_id))
            }
        })
        .await
    }
}
