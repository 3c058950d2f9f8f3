use std::{collections::HashMap, sync::Arc};

use anyhow::anyhow;

use super::data::{ChannelFeed, FeedError};
use crate::ArcStr;

/// Mock implementation of the YouTube API actor.
///
/// Serves canned feeds by channel id; unknown channels fail as a fetch
/// error would.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    feeds: Arc<HashMap<ArcStr, ChannelFeed>>,
}

impl Mock {
    pub fn new(feeds: HashMap<ArcStr, ChannelFeed>) -> Self {
        Self {
            feeds: Arc::new(feeds),
        }
    }

    pub fn get_channel_feed(&self, channel_id: &str) -> Result<ChannelFeed, FeedError> {
        self.feeds
            .get(channel_id)
            .cloned()
            .ok_or_else(|| FeedError::Fetch(anyhow!("No mock feed for channel {channel_id}")))
    }
}
