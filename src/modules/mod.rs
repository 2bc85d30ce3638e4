pub mod catalog;
pub mod identity;
pub mod lists;
pub mod search;
