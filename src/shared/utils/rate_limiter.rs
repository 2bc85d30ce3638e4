use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{direct::NotKeyed, InMemoryState},
    Jitter, Quota, RateLimiter as GovernorRateLimiter,
};
use std::num::NonZeroU32;
use std::time::Duration;

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Per-upstream request throttle. Waiting never fails; it only delays.
pub struct RateLimiter {
    limiter: DirectLimiter,
    requests_per_second: f64,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64, burst_size: u32) -> Self {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::from_secs(3600)
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        Self {
            limiter: GovernorRateLimiter::direct(quota),
            requests_per_second,
        }
    }

    /// AniList: 30 req/min in its degraded state
    pub fn for_anilist() -> Self {
        Self::new(0.5, 2)
    }

    /// Jikan v4: ~60 req/min with a 3 req/sec burst
    pub fn for_jikan() -> Self {
        Self::new(1.0, 3)
    }

    pub async fn wait(&self) {
        self.limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;
    }

    pub fn can_make_request_now(&self) -> bool {
        self.limiter.check().is_ok()
    }

    pub fn requests_per_second(&self) -> f64 {
        self.requests_per_second
    }
}
