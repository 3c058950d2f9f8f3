use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::ArcStr;

/// A rendered document and the moment its upstream feed was fetched.
///
/// Entries are never mutated; a refresh replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub document: ArcStr,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry may still be served at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// Channel id to entry map with a single freshness window.
///
/// Staleness is only checked on lookup. Nothing is ever evicted.
#[derive(Debug)]
pub struct CacheData {
    entries: HashMap<ArcStr, CacheEntry>,
    ttl: TimeDelta,
}

impl CacheData {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// The entry for `channel_id`, if it is fresh at `now`.
    pub fn get(&self, channel_id: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        self.entries
            .get(channel_id)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .cloned()
    }

    pub fn put(&mut self, channel_id: ArcStr, entry: CacheEntry) {
        self.entries.insert(channel_id, entry);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
