use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted after every successful list mutation so that dependent views can
/// refetch. Carries the owner so subscribers can scope invalidation per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ListEvent {
    ListCreated {
        owner_id: Uuid,
        list_id: Uuid,
        title: String,
    },
    ListUpdated {
        owner_id: Uuid,
        list_id: Uuid,
        title: String,
    },
    ListDeleted {
        owner_id: Uuid,
        list_id: Uuid,
    },
    ItemAdded {
        owner_id: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        position: i32,
    },
    ItemUpdated {
        owner_id: Uuid,
        list_id: Uuid,
        item_id: Uuid,
    },
    ItemMoved {
        owner_id: Uuid,
        list_id: Uuid,
        item_id: Uuid,
        from: i32,
        to: i32,
    },
    ItemRemoved {
        owner_id: Uuid,
        list_id: Uuid,
        item_id: Uuid,
    },
}

impl ListEvent {
    pub fn owner_id(&self) -> Uuid {
        match self {
            ListEvent::ListCreated { owner_id, .. }
            | ListEvent::ListUpdated { owner_id, .. }
            | ListEvent::ListDeleted { owner_id, .. }
            | ListEvent::ItemAdded { owner_id, .. }
            | ListEvent::ItemUpdated { owner_id, .. }
            | ListEvent::ItemMoved { owner_id, .. }
            | ListEvent::ItemRemoved { owner_id, .. } => *owner_id,
        }
    }

    pub fn list_id(&self) -> Uuid {
        match self {
            ListEvent::ListCreated { list_id, .. }
            | ListEvent::ListUpdated { list_id, .. }
            | ListEvent::ListDeleted { list_id, .. }
            | ListEvent::ItemAdded { list_id, .. }
            | ListEvent::ItemUpdated { list_id, .. }
            | ListEvent::ItemMoved { list_id, .. }
            | ListEvent::ItemRemoved { list_id, .. } => *list_id,
        }
    }
}
