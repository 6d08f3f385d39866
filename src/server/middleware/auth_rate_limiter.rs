//! Login rate limiting for brute force protection.
//!
//! The store is a trait so a multi-instance deployment can swap the
//! in-memory implementation for a shared cache; handlers only ever see
//! `Arc<dyn AttemptStore>` injected through `AppState`.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Failure-tracking store consulted before and after each login attempt.
pub trait AttemptStore: Send + Sync {
    /// Check whether the client may attempt a login. `Err` carries the
    /// remaining lockout in seconds.
    fn check_allowed(&self, client_id: &str) -> Result<(), u64>;

    /// Record a failed attempt.
    fn record_failure(&self, client_id: &str);

    /// Record a successful attempt, clearing the client's failure history.
    fn record_success(&self, client_id: &str);
}

/// In-memory attempt store with windowed counting and exponential lockout.
pub struct InMemoryAttemptStore {
    /// Map of client identifier -> tracker
    attempts: DashMap<String, AttemptTracker>,
    /// Maximum failed attempts before lockout
    max_attempts: u32,
    /// Time window for counting failures
    window: Duration,
    /// Base lockout duration, doubled per consecutive lockout
    base_lockout: Duration,
}

/// Tracks login attempts for a single client
struct AttemptTracker {
    failure_count: u32,
    window_start: Instant,
    lockout_until: Option<Instant>,
    lockout_count: u32,
}

impl Default for InMemoryAttemptStore {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(300), Duration::from_secs(60))
    }
}

impl InMemoryAttemptStore {
    pub fn new(max_attempts: u32, window: Duration, base_lockout: Duration) -> Self {
        Self {
            attempts: DashMap::new(),
            max_attempts,
            window,
            base_lockout,
        }
    }

    fn lockout_duration(&self, lockout_count: u32) -> Duration {
        // Exponential backoff, capped at one hour
        let multiplier = 2u32.saturating_pow(lockout_count.min(6));
        (self.base_lockout * multiplier).min(Duration::from_secs(3600))
    }
}

impl AttemptStore for InMemoryAttemptStore {
    fn check_allowed(&self, client_id: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(mut entry) = self.attempts.get_mut(client_id) else {
            return Ok(());
        };
        let tracker = entry.value_mut();

        if let Some(until) = tracker.lockout_until {
            if now < until {
                return Err((until - now).as_secs().max(1));
            }
            tracker.lockout_until = None;
            tracker.failure_count = 0;
            tracker.window_start = now;
        }

        Ok(())
    }

    fn record_failure(&self, client_id: &str) {
        let now = Instant::now();

        let mut entry = self
            .attempts
            .entry(client_id.to_string())
            .or_insert_with(|| AttemptTracker {
                failure_count: 0,
                window_start: now,
                lockout_until: None,
                lockout_count: 0,
            });
        let tracker = entry.value_mut();

        if now.duration_since(tracker.window_start) > self.window {
            tracker.failure_count = 0;
            tracker.window_start = now;
        }

        tracker.failure_count += 1;

        if tracker.failure_count >= self.max_attempts {
            let lockout = self.lockout_duration(tracker.lockout_count);
            tracker.lockout_until = Some(now + lockout);
            tracker.lockout_count += 1;
            tracker.failure_count = 0;
            tracker.window_start = now;
        }
    }

    fn record_success(&self, client_id: &str) {
        self.attempts.remove(client_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryAttemptStore {
        InMemoryAttemptStore::new(3, Duration::from_secs(300), Duration::from_secs(60))
    }

    #[test]
    fn test_unknown_client_is_allowed() {
        assert!(store().check_allowed("1.2.3.4").is_ok());
    }

    #[test]
    fn test_lockout_after_max_failures() {
        let store = store();

        store.record_failure("1.2.3.4");
        store.record_failure("1.2.3.4");
        assert!(store.check_allowed("1.2.3.4").is_ok());

        store.record_failure("1.2.3.4");
        let wait = store.check_allowed("1.2.3.4").unwrap_err();
        assert!(wait > 0 && wait <= 60);
    }

    #[test]
    fn test_success_clears_history() {
        let store = store();

        store.record_failure("1.2.3.4");
        store.record_failure("1.2.3.4");
        store.record_success("1.2.3.4");

        store.record_failure("1.2.3.4");
        store.record_failure("1.2.3.4");
        assert!(store.check_allowed("1.2.3.4").is_ok());
    }

    #[test]
    fn test_clients_are_independent() {
        let store = store();

        for _ in 0..3 {
            store.record_failure("attacker");
        }
        assert!(store.check_allowed("attacker").is_err());
        assert!(store.check_allowed("innocent").is_ok());
    }
}
