pub mod identity_provider;
pub mod user_identity;

pub use identity_provider::IdentityProvider;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use user_identity::UserIdentity;
