pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::{ListService, ViewInvalidator};
pub use domain::{AnimePayload, ItemPatch, List, ListEvent, ListItem, ListRepository};
pub use infrastructure::{InMemoryListRepository, ListRepositoryImpl};
