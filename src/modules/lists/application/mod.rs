pub mod invalidation;
pub mod service;

pub use invalidation::ViewInvalidator;
pub use service::ListService;
