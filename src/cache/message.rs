use chrono::{DateTime, Utc};
use tokio::sync::oneshot::Sender;

use super::data::CacheEntry;
use crate::ArcStr;

/// Messages that can be sent to a [`FreshnessCache`](super::FreshnessCache) actor.
#[derive(Debug)]
pub enum Message {
    /// Looks up a fresh entry, judged against `now`
    Get {
        channel_id: ArcStr,
        now: DateTime<Utc>,
        tx: Sender<Option<CacheEntry>>,
    },
    /// Stores or replaces an entry
    Put {
        channel_id: ArcStr,
        entry: CacheEntry,
    },
    /// Counts stored entries
    Len { tx: Sender<usize> },
}
