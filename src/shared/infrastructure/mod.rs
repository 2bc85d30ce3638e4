/// Shared infrastructure concerns
///
/// Infrastructure used by more than one module.
pub mod database;

pub use database::{Database, DbConnection, DbPool};
