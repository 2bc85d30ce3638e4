pub mod logger;
pub mod rate_limiter;
pub mod validation;

pub use logger::{init_logger, LogContext, TimedOperation};
pub use rate_limiter::RateLimiter;
pub use validation::Validator;
