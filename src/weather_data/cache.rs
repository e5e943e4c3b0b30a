use crate::types::coordinate::CoordinateKey;
use crate::types::observation::WeatherObservation;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default time-to-live of a cached observation.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    observation: WeatherObservation,
    fetched_at: Instant,
}

/// In-process, time-bounded observation cache keyed by exact coordinate.
///
/// The lock is only held for a single lookup or insert, never across a network
/// call, so two concurrent misses on the same key may both fetch. Stale entries
/// stay in the map until a newer observation replaces them.
#[derive(Debug)]
pub struct ObservationCache {
    entries: Mutex<HashMap<CoordinateKey, CacheEntry>>,
    ttl: Duration,
}

impl ObservationCache {
    /// Creates an empty cache. A zero `ttl` makes every lookup a miss.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// How long an entry counts as fresh after it was stored.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached observation if it is younger than the TTL.
    pub async fn get_fresh(&self, key: &CoordinateKey) -> Option<WeatherObservation> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.observation)
    }

    /// Stores an observation, overwriting whatever was cached for the key.
    pub async fn insert(&self, key: CoordinateKey, observation: WeatherObservation) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CacheEntry {
                observation,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of entries, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for ObservationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
