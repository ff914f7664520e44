//! Cache data structures with TTL support

use serde::Serialize;
use std::time::{Duration, Instant};

/// A cached value together with when it was stored and how long it lives.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry stamped with the current instant
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// An entry is logically absent once its age exceeds its TTL
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Duration {
        self.ttl.saturating_sub(self.cached_at.elapsed())
    }
}

/// Counters reported by the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
}
