pub mod catalog_entry;
pub mod description;

pub use catalog_entry::{
    AiringFeed, CatalogEntry, MovieEntry, Pagination, PaginationItems, SearchPage,
};
pub use description::clean_description;
