use super::suggestion_service::{SuggestionService, Suggestions};
use crate::shared::errors::AppResult;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    Ready(Suggestions),
    /// A newer keystroke arrived; this response must not be rendered
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    current_token: u64,
    pending: Option<CancellationToken>,
}

/// Debounced suggestions for one input field.
///
/// Each keystroke takes a fresh request token and cancels the previous pending
/// timer. Only the response whose token is still current is handed back.
pub struct SuggestionSession {
    service: Arc<SuggestionService>,
    debounce: Duration,
    state: Mutex<SessionState>,
}

impl SuggestionSession {
    pub fn new(service: Arc<SuggestionService>, debounce: Duration) -> Self {
        Self {
            service,
            debounce,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = state.pending.take() {
            previous.cancel();
        }

        state.current_token += 1;
        let timer = CancellationToken::new();
        state.pending = Some(timer.clone());
        (state.current_token, timer)
    }

    fn is_current(&self, token: u64) -> bool {
        let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.current_token == token
    }

    pub async fn keystroke(&self, query: &str) -> AppResult<SuggestionOutcome> {
        let (token, timer) = self.begin();

        tokio::select! {
            _ = timer.cancelled() => return Ok(SuggestionOutcome::Superseded),
            _ = tokio::time::sleep(self.debounce) => {}
        }

        let results = self.service.suggest(query).await;

        if !self.is_current(token) {
            return Ok(SuggestionOutcome::Superseded);
        }
        results.map(SuggestionOutcome::Ready)
    }

    /// Abandon the pending timer, e.g. when the field loses focus.
    pub fn cancel(&self) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.current_token += 1;
        if let Some(pending) = state.pending.take() {
            pending.cancel();
        }
    }
}
