pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use application::MetadataGateway;
pub use domain::{AiringFeed, CatalogEntry, MovieEntry, Pagination, PaginationItems, SearchPage};
pub use infrastructure::{AniListClient, JikanClient};
pub use traits::{AiringCatalogClient, SeasonCatalogClient};
