use tokio::sync::oneshot::Sender;

use super::data::{ChannelFeed, FeedError};
use crate::ArcStr;

/// Messages that can be sent to a [`YouTubeApi`](super::YouTubeApi) actor.
#[derive(Debug)]
pub enum Message {
    /// Fetches and parses the upload feed of a channel
    GetChannelFeed {
        channel_id: ArcStr,
        tx: Sender<Result<ChannelFeed, FeedError>>,
    },
}
