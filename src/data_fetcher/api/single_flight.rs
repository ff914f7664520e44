//! Deduplication of concurrent identical requests.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;
use tracing::debug;

/// Map from key to the shared handle of the computation in flight for it.
///
/// Callers arriving while a computation for the same key is running await
/// the same handle instead of starting another one. The entry is removed as
/// soon as the computation resolves, so later calls start fresh.
pub struct SingleFlight<T: Clone> {
    in_flight: Mutex<HashMap<String, Shared<BoxFuture<'static, T>>>>,
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `make()` for `key` unless a run for the same key is already in flight.
    pub async fn run<F, Fut>(&self, key: &str, make: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let shared = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(key) {
                Some(existing) => {
                    debug!("Joining in-flight request for {key}");
                    existing.clone()
                }
                None => {
                    let shared = make().boxed().shared();
                    in_flight.insert(key.to_string(), shared.clone());
                    shared
                }
            }
        };

        let result = shared.clone().await;

        // Only remove the entry we awaited; a newer run may already own the key
        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .get(key)
            .is_some_and(|current| Shared::ptr_eq(current, &shared))
        {
            in_flight.remove(key);
        }

        result
    }

    /// Number of keys currently in flight.
    pub async fn in_flight(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
