pub mod in_memory_list_repository;
pub mod list_repository_impl;

pub use in_memory_list_repository::InMemoryListRepository;
pub use list_repository_impl::ListRepositoryImpl;
