//! Strictly increasing nonces for signed requests

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of strictly increasing nonces
///
/// Each value is `max(now in microseconds, previous + 1)`, so two calls in the
/// same clock tick (or after the wall clock steps backwards) still yield
/// increasing values. The counter is atomic and may be shared across threads.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator starting from the current clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose next nonce is strictly greater than `floor`
    ///
    /// Useful when a previous process already used nonces ahead of the clock.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    /// Produce the next nonce
    pub fn next(&self) -> u64 {
        let now = now_micros();
        let mut current = self.last.load(Ordering::Acquire);

        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(observed) => current = observed,
            }
        }
    }

    /// The most recently issued nonce (0 if none yet)
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
