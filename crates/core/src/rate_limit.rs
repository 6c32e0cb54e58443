//! Rate limiting for the competition-creation path.
//!
//! Guards the validation/creation path against accidental double-submits.
//! State is process-local and in-memory, keyed by (server id, owner id);
//! it is intentionally not durable or cross-process-consistent.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

/// Type alias for the limiter used per (server, owner) pair.
type KeyedLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// One creation attempt budget per (server, owner), shared process-wide.
pub struct CreationRateLimiter {
    limiters: RwLock<HashMap<(String, String), Arc<KeyedLimiter>>>,
    creations_per_minute: u32,
}

impl CreationRateLimiter {
    /// Create a limiter allowing `creations_per_minute` attempts per key.
    pub fn new(creations_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            creations_per_minute,
        }
    }

    fn get_or_create_limiter(&self, server_id: &str, owner_id: &str) -> Arc<KeyedLimiter> {
        let key = (server_id.to_string(), owner_id.to_string());
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(&key) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();
        // Double-check in case another thread created it
        if let Some(limiter) = limiters.get(&key) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.creations_per_minute).unwrap_or(NonZeroU32::new(3).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(key, limiter.clone());
        limiter
    }

    /// Check and consume one attempt for the pair. Returns Ok(()) when
    /// allowed, or Err with the retry-after in seconds when rate limited.
    /// A rejected check consumes nothing.
    pub fn check(&self, server_id: &str, owner_id: &str) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(server_id, owner_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }

    /// Drop every per-key limiter. Exists for test isolation; production
    /// code never calls it.
    pub fn clear_all(&self) {
        self.limiters.write().unwrap().clear();
    }
}

impl std::fmt::Debug for CreationRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreationRateLimiter")
            .field("creations_per_minute", &self.creations_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}
