pub mod application;
pub mod commands;
pub mod domain;

pub use application::{SuggestionOutcome, SuggestionService, SuggestionSession, Suggestions};
pub use domain::SuggestionCache;
