use log::{debug, error, info, warn};
use std::sync::Once;
use tokio::time::Instant;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup; `RUST_LOG` still wins
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .filter_module("anishelf", log::LevelFilter::Debug)
            .filter_module("anishelf_lib", log::LevelFilter::Debug)
            .filter_module("diesel", log::LevelFilter::Warn)
            .filter_module("reqwest", log::LevelFilter::Warn)
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("tower_http", log::LevelFilter::Info)
            .filter_module("tokio", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers, one per kind of event the service emits
pub struct LogContext;

impl LogContext {
    /// Log a list store round trip; `None` marks the start
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log an outbound call to AniList, Jikan or the auth server
    pub fn api_call(provider: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!(
                "API: {} {} {} in {}ms",
                provider, endpoint, status, duration
            ),
            None => debug!("API: Starting {} {}", provider, endpoint),
        }
    }

    /// Log an upstream failure that is about to fail the whole request
    pub fn upstream_failure(provider: &str, operation: &str, error: &dyn std::error::Error) {
        warn!("API: {} {} failed: {}", provider, operation, error);
    }

    pub fn search_operation(query: &str, source: Option<&str>, results: Option<usize>) {
        match (source, results) {
            (Some(s), Some(r)) => info!("Search: '{}' via {} returned {} results", query, s, r),
            (Some(s), None) => debug!("Search: Starting '{}' via {}", query, s),
            (None, Some(r)) => info!("Search: '{}' returned {} results", query, r),
            (None, None) => debug!("Search: Starting '{}'", query),
        }
    }

    /// Log a suggestion cache lookup
    pub fn cache_lookup(query: &str, hit: bool, entries: usize) {
        let outcome = if hit { "hit" } else { "miss" };
        debug!("Cache: {} for '{}' ({} entries)", outcome, query, entries);
    }

    /// Log a list mutation; `subject` is the list or item that changed
    pub fn list_mutation(action: &str, owner_id: Uuid, subject: Uuid) {
        info!("Lists: {} {} for owner {}", action, subject, owner_id);
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Times an operation. Dropping it unfinished (an early `?` return) logs the
/// elapsed time as a failure.
pub struct TimedOperation {
    start: Instant,
    operation: String,
    finished: bool,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
            finished: false,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(mut self) -> u64 {
        self.finished = true;
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(mut self, info: &str) -> u64 {
        self.finished = true;
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}

impl Drop for TimedOperation {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                "Performance: {} failed after {}ms",
                self.operation,
                self.elapsed_ms()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn finish_reports_elapsed_time() {
        let timer = TimedOperation::new("fetch_movies");
        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(timer.elapsed_ms(), 250);
        assert_eq!(timer.finish_with_info("20 movies"), 250);
    }

    #[tokio::test(start_paused = true)]
    async fn unfinished_timer_can_be_dropped() {
        let timer = TimedOperation::new("fetch_top_airing");
        tokio::time::advance(Duration::from_millis(40)).await;
        drop(timer);
    }
}
