use chrono::TimeDelta;
use tokio::{sync::mpsc, task::JoinHandle};

use super::{FreshnessCache, data::CacheData, message::Message};

/// Core of the freshness cache actor.
///
/// The map is owned by a single task, so every lookup and store is handled
/// one at a time in arrival order.
#[derive(Debug)]
pub struct Core {
    data: CacheData,
}

impl Core {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            data: CacheData::new(ttl),
        }
    }

    pub fn spawn(mut self) -> (FreshnessCache, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get {
                        channel_id,
                        now,
                        tx,
                    } => {
                        let _ = tx.send(self.data.get(&channel_id, now));
                    }
                    Message::Put { channel_id, entry } => self.data.put(channel_id, entry),
                    Message::Len { tx } => {
                        let _ = tx.send(self.data.len());
                    }
                }
            }
        });

        (FreshnessCache(tx), handle)
    }
}
