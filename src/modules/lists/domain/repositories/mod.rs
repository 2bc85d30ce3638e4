pub mod list_repository;

pub use list_repository::ListRepository;
#[cfg(test)]
pub use list_repository::MockListRepository;
