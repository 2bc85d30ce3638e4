use crate::modules::lists::domain::entities::{AnimePayload, List, ListItem};
use crate::schema::{list_items, lists};
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ============= LIST MODELS =============

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListModel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = lists)]
pub struct NewList<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
}

impl From<ListModel> for List {
    fn from(model: ListModel) -> Self {
        List {
            id: model.id,
            owner_id: model.owner_id,
            title: model.title,
            created_at: model.created_at,
        }
    }
}

// ============= LIST ITEM MODELS =============

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(ListModel, foreign_key = list_id))]
#[diesel(table_name = list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListItemModel {
    pub id: Uuid,
    pub list_id: Uuid,
    pub anime: JsonValue,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = list_items)]
pub struct NewListItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub anime: JsonValue,
    pub position: i32,
}

// None fields are skipped by diesel, so this doubles as a partial patch
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = list_items)]
pub struct ListItemChangeset {
    pub anime: Option<JsonValue>,
    pub position: Option<i32>,
}

impl ListItemModel {
    pub fn into_domain(self) -> AppResult<ListItem> {
        let anime = AnimePayload::new(self.anime).map_err(|e| {
            AppError::SerializationError(format!("Stored anime payload is invalid: {}", e))
        })?;

        Ok(ListItem {
            id: self.id,
            list_id: self.list_id,
            anime,
            position: self.position,
            created_at: self.created_at,
        })
    }
}
