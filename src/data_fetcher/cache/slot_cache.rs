use super::core::TtlCache;
use super::types::CacheStats;
use crate::constants::cache_ttl;
use crate::data_fetcher::models::TimeSlot;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Aggregated slots memoized per date.
///
/// Today's slots (Bali date) live 5 minutes, future dates 10 minutes. Also
/// remembers the Bali day for which a background warm-up was last started.
#[derive(Debug)]
pub struct SlotCache {
    slots: TtlCache<Vec<TimeSlot>>,
    warmed_for: Mutex<Option<String>>,
}

impl Default for SlotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotCache {
    pub fn new() -> Self {
        Self {
            slots: TtlCache::with_default_ttl(
                "slots",
                Duration::from_secs(cache_ttl::FUTURE_SLOTS_SECONDS),
            ),
            warmed_for: Mutex::new(None),
        }
    }

    /// TTL tier for a date relative to today's Bali date.
    pub fn ttl_for(date: &str, today: &str) -> Duration {
        if date == today {
            Duration::from_secs(cache_ttl::TODAY_SLOTS_SECONDS)
        } else {
            Duration::from_secs(cache_ttl::FUTURE_SLOTS_SECONDS)
        }
    }

    pub async fn get(&self, date: &str) -> Option<Vec<TimeSlot>> {
        self.slots.get(&date.to_string()).await
    }

    pub async fn set(&self, date: &str, today: &str, slots: Vec<TimeSlot>) {
        let ttl = Self::ttl_for(date, today);
        self.slots.set_with_ttl(date.to_string(), slots, ttl).await;
    }

    /// Returns true exactly once per Bali day, marking the day as warmed.
    pub async fn needs_warm_up(&self, today: &str) -> bool {
        let mut warmed_for = self.warmed_for.lock().await;
        if warmed_for.as_deref() == Some(today) {
            return false;
        }
        info!("Starting slot warm-up for {today}");
        *warmed_for = Some(today.to_string());
        true
    }

    pub async fn clear(&self) {
        self.slots.clear().await;
        *self.warmed_for.lock().await = None;
    }

    pub async fn stats(&self) -> CacheStats {
        self.slots.stats().await
    }
}
