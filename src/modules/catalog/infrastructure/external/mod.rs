pub mod anilist;
pub mod common;
pub mod jikan;

pub use anilist::AniListClient;
pub use common::CommonHttpHandler;
pub use jikan::JikanClient;
