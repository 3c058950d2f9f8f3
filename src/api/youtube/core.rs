use tokio::task::JoinHandle;

use super::{
    YouTubeApi,
    data::{ChannelFeed, FeedError},
    message::Message,
    parse,
};
use crate::{ArcStr, net::Net};

/// The core of the YouTube API actor.
///
/// Owns the upstream base URL and turns channel ids into parsed feeds. Each
/// request is served on its own task.
#[derive(Debug)]
pub struct Core {
    /// The networking actor for making HTTP requests
    net: Net,
    /// Base URL the feeds are fetched from
    upstream: ArcStr,
}

impl Core {
    pub fn new(net: Net, upstream: ArcStr) -> Self {
        Self { net, upstream }
    }

    /// Transforms the core instance into an actor.
    pub fn spawn(self) -> (YouTubeApi, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::GetChannelFeed { channel_id, tx } => {
                        let net = self.net.clone();
                        let upstream = self.upstream.clone();
                        tokio::spawn(async move {
                            let response = get_channel_feed(&net, &upstream, &channel_id).await;
                            let _ = tx.send(response);
                        });
                    }
                }
            }
        });

        (YouTubeApi::Actual(tx), handle)
    }
}

async fn get_channel_feed(
    net: &Net,
    upstream: &str,
    channel_id: &str,
) -> Result<ChannelFeed, FeedError> {
    let url = parse::feed_url(upstream, channel_id).map_err(FeedError::Fetch)?;
    let body = net
        .get(ArcStr::from(url.as_str()))
        .await
        .map_err(FeedError::Fetch)?;

    parse::parse_channel_feed(&body).map_err(FeedError::Parse)
}
