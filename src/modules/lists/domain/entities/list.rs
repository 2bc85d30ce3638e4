use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved title of the list every owner gets lazily on first "add to list".
pub const DEFAULT_LIST_TITLE: &str = "My List";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl List {
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            created_at: Utc::now(),
        }
    }

    pub fn new_default(owner_id: Uuid) -> Self {
        Self::new(owner_id, DEFAULT_LIST_TITLE)
    }

    pub fn is_default(&self) -> bool {
        self.title == DEFAULT_LIST_TITLE
    }

    pub fn is_owned_by(&self, owner_id: Uuid) -> bool {
        self.owner_id == owner_id
    }

    pub fn rename(&mut self, new_title: impl Into<String>) {
        self.title = new_title.into();
    }
}
