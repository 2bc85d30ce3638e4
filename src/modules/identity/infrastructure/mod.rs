pub mod anonymous_identity_provider;
pub mod supabase_identity_provider;

pub use anonymous_identity_provider::AnonymousIdentityProvider;
pub use supabase_identity_provider::SupabaseIdentityProvider;
