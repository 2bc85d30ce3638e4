use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    results: V,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    // Oldest insertion at the front
    order: VecDeque<String>,
}

impl<V> CacheState<V> {
    fn forget(&mut self, query: &str) {
        self.entries.remove(query);
        self.order.retain(|key| key != query);
    }
}

/// Time-expiring suggestion results keyed by the exact query string.
///
/// Expired entries are dropped lazily on lookup. Once `capacity` keys are held,
/// inserting a new key evicts the oldest-inserted one (insertion order, not LRU).
/// Timestamps come from `tokio::time`, so paused-clock tests control expiry.
#[derive(Debug)]
pub struct SuggestionCache<V> {
    state: Mutex<CacheState<V>>,
    capacity: usize,
}

impl<V: Clone> SuggestionCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        // Cache state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn lookup(&self, query: &str) -> Option<V> {
        let mut state = self.lock();
        let expires_at = state.entries.get(query)?.expires_at;

        if Instant::now() < expires_at {
            state.entries.get(query).map(|entry| entry.results.clone())
        } else {
            state.forget(query);
            None
        }
    }

    pub fn store(&self, query: &str, results: V, ttl: Duration) {
        let mut state = self.lock();
        let entry = CacheEntry {
            results,
            expires_at: Instant::now() + ttl,
        };

        if state.entries.contains_key(query) {
            state.order.retain(|key| key != query);
        } else if state.entries.len() >= self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }

        state.order.push_back(query.to_string());
        state.entries.insert(query.to_string(), entry);
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    /// Number of held entries, expired or not
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: Clone> Default for SuggestionCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
