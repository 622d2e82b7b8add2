use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::models::{GameMode, PlayerRecord};

/// How long a cached lookup stays fresh.
pub const CACHE_TTL: Duration = Duration::from_millis(30_000);

/// Entries older than `CACHE_TTL * SWEEP_MULTIPLIER` are dropped by the
/// write-time sweep.
const SWEEP_MULTIPLIER: u32 = 2;

struct CacheEntry {
    record: PlayerRecord,
    inserted_at: Instant,
}

/// In-memory store of player-details responses, keyed by lowercase
/// player name plus queue tag. Lives for the process; never persisted.
#[derive(Default)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str, mode: GameMode) -> String {
        format!("{}:{}", name.to_lowercase(), mode.tag())
    }

    /// Fresh record for `(name, mode)`, if any. An expired entry counts
    /// as a miss but is left in place; only `put` removes entries.
    pub fn get(&self, name: &str, mode: GameMode) -> Option<&PlayerRecord> {
        let entry = self.entries.get(&Self::key(name, mode))?;
        if entry.inserted_at.elapsed() > CACHE_TTL {
            return None;
        }
        Some(&entry.record)
    }

    /// Store a fresh response, then sweep out every entry older than
    /// twice the TTL.
    pub fn put(&mut self, name: &str, mode: GameMode, record: PlayerRecord) {
        self.entries.insert(
            Self::key(name, mode),
            CacheEntry {
                record,
                inserted_at: Instant::now(),
            },
        );

        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() <= CACHE_TTL * SWEEP_MULTIPLIER);
        let swept = before - self.entries.len();
        if swept > 0 {
            debug!(swept, "swept stale cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    fn record(name: &str, mmr: f64) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            mmr: Some(mmr),
            rank: "Gold 2".to_string(),
            ..PlayerRecord::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_fresh_entries() {
        let mut cache = ResponseCache::new();
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1500.0));

        let hit = cache.get("Funky", GameMode::TwentyFour).unwrap();
        assert_eq!(hit.mmr, Some(1500.0));
    }

    #[tokio::test(start_paused = true)]
    async fn key_is_case_insensitive_and_per_mode() {
        let mut cache = ResponseCache::new();
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1500.0));

        assert!(cache.get("fUNKY", GameMode::TwentyFour).is_some());
        assert!(cache.get("Funky", GameMode::Twelve).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expires_strictly_after_ttl() {
        let mut cache = ResponseCache::new();
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1500.0));

        advance(CACHE_TTL).await;
        assert!(cache.get("Funky", GameMode::TwentyFour).is_some());

        advance(Duration::from_millis(1)).await;
        assert!(cache.get("Funky", GameMode::TwentyFour).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn read_never_prunes() {
        let mut cache = ResponseCache::new();
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1500.0));

        advance(CACHE_TTL + Duration::from_millis(1)).await;
        assert!(cache.get("Funky", GameMode::TwentyFour).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn write_sweeps_entries_past_twice_ttl() {
        let mut cache = ResponseCache::new();
        cache.put("Old", GameMode::TwentyFour, record("Old", 1000.0));

        advance(CACHE_TTL * 2 + Duration::from_millis(1)).await;
        cache.put("New", GameMode::TwentyFour, record("New", 2000.0));

        assert_eq!(cache.len(), 1);
        assert!(cache.get("New", GameMode::TwentyFour).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_keeps_entries_at_exactly_twice_ttl() {
        let mut cache = ResponseCache::new();
        cache.put("Old", GameMode::TwentyFour, record("Old", 1000.0));

        advance(CACHE_TTL * 2).await;
        cache.put("New", GameMode::TwentyFour, record("New", 2000.0));

        // Stale for reads, but the sweep only removes entries strictly
        // older than the threshold.
        assert_eq!(cache.len(), 2);
        assert!(cache.get("Old", GameMode::TwentyFour).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn put_overwrites_existing_key() {
        let mut cache = ResponseCache::new();
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1500.0));
        cache.put("Funky", GameMode::TwentyFour, record("Funky", 1550.0));

        assert_eq!(cache.len(), 1);
        let hit = cache.get("Funky", GameMode::TwentyFour).unwrap();
        assert_eq!(hit.mmr, Some(1550.0));
    }
}
