use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{mpsc::Sender, oneshot};

use crate::ArcStr;

mod core;
mod data;
mod message;

pub use data::CacheEntry;
use message::Message;

/// Default freshness window: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// In-memory cache of rendered feeds, keyed by channel id.
///
/// An entry is served while it is younger than the configured window and
/// replaced by the caller once it is not. The cache lives for the whole
/// process and never evicts.
///
/// # Examples
/// ```ignore
/// let cache = FreshnessCache::spawn(DEFAULT_TTL)?;
/// if let Some(entry) = cache.get(channel_id.clone()).await? {
///     return Ok(entry.document);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FreshnessCache(Sender<Message>);

impl FreshnessCache {
    /// Spawns a cache whose entries stay fresh for `ttl`.
    ///
    /// # Errors
    /// Fails if `ttl` does not fit a signed duration.
    pub fn spawn(ttl: Duration) -> anyhow::Result<Self> {
        let ttl = TimeDelta::from_std(ttl).context("Cache duration is out of range")?;
        let (cache, _) = core::Core::new(ttl).spawn();
        Ok(cache)
    }

    /// The entry for `channel_id` if it is still fresh now.
    pub async fn get(&self, channel_id: ArcStr) -> anyhow::Result<Option<CacheEntry>> {
        self.get_at(channel_id, Utc::now()).await
    }

    /// The entry for `channel_id` if it is fresh at `now`.
    pub async fn get_at(
        &self,
        channel_id: ArcStr,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<CacheEntry>> {
        let (tx, rx) = oneshot::channel();
        self.0
            .send(Message::Get {
                channel_id,
                now,
                tx,
            })
            .await
            .context("Sending message to FreshnessCache actor")?;
        rx.await
            .context("Awaiting response from FreshnessCache actor")
    }

    /// Stores `document` for `channel_id`, replacing any previous entry.
    pub async fn put(
        &self,
        channel_id: ArcStr,
        document: ArcStr,
        fetched_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let entry = CacheEntry {
            document,
            fetched_at,
        };
        self.0
            .send(Message::Put { channel_id, entry })
            .await
            .context("Sending message to FreshnessCache actor")
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> anyhow::Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.0
            .send(Message::Len { tx })
            .await
            .context("Sending message to FreshnessCache actor")?;
        rx.await.context("Awaiting response from FreshnessCache actor")
    }
}
