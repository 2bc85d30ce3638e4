pub mod domain;
pub mod extractor;
pub mod infrastructure;

pub use domain::{IdentityProvider, UserIdentity};
pub use extractor::CurrentUser;
pub use infrastructure::{AnonymousIdentityProvider, SupabaseIdentityProvider};
