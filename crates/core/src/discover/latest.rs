//! Stale-response guard for overlapping requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Holds the value of the newest committed request.
///
/// Each request takes a token from `begin()`; `commit` only applies values
/// whose token is at least as new as the last applied one, so a slow older
/// response can never overwrite a newer result.
pub struct LatestSlot<T> {
    next_token: AtomicU64,
    state: Mutex<(u64, Option<T>)>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            next_token: AtomicU64::new(0),
            state: Mutex::new((0, None)),
        }
    }

    /// Start a request, superseding all earlier tokens.
    pub fn begin(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a response. Returns false when a newer response has already
    /// been applied, in which case `value` is dropped.
    pub fn commit(&self, token: u64, value: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if token < state.0 {
            return false;
        }
        *state = (token, Some(value));
        true
    }

    pub fn latest(&self) -> Option<T>
    where
        T: Clone,
    {
        self.state.lock().unwrap().1.clone()
    }
}
