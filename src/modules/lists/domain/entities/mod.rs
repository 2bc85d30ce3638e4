pub mod list;
pub mod list_item;

pub use list::{List, DEFAULT_LIST_TITLE};
pub use list_item::{AnimePayload, ItemPatch, ListItem};
