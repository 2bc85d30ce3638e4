pub mod session;
pub mod suggestion_service;

pub use session::{SuggestionOutcome, SuggestionSession, DEFAULT_DEBOUNCE};
pub use suggestion_service::{SuggestionService, Suggestions};
