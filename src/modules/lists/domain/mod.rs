pub mod entities;
pub mod events;
pub mod repositories;

pub use entities::{AnimePayload, ItemPatch, List, ListItem, DEFAULT_LIST_TITLE};
pub use events::ListEvent;
pub use repositories::ListRepository;
