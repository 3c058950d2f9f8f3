use std::collections::HashMap;

use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};

use crate::{ArcStr, net::Net};

mod core;
pub mod data;
mod message;
mod mock;
pub mod parse;

pub use data::{ChannelFeed, FeedEntry, FeedError};
use message::Message;

/// Default base URL for channel feeds.
pub const DEFAULT_UPSTREAM: &str = "https://www.youtube.com";

/// The YouTube API actor that fetches channel upload feeds.
///
/// This actor intermediates calls to the networking actor: it builds the feed
/// URL for a channel id, fetches it and parses the Atom document.
///
/// # Examples
/// ```ignore
/// let youtube = YouTubeApi::spawn(net, ArcStr::from(DEFAULT_UPSTREAM));
/// let feed = youtube.get_channel_feed(ArcStr::from("UC123")).await?;
/// ```
#[derive(Debug, Clone)]
pub enum YouTubeApi {
    /// A real actor fetching through the networking actor
    Actual(Sender<Message>),
    /// A mock implementation serving canned feeds
    Mock(mock::Mock),
}

impl YouTubeApi {
    /// Creates a new YouTube API actor fetching from `upstream`.
    pub fn spawn(net: Net, upstream: ArcStr) -> Self {
        let (youtube, _) = core::Core::new(net, upstream).spawn();
        youtube
    }

    /// Creates a mock answering with `feeds`, keyed by channel id.
    pub fn mock(feeds: HashMap<ArcStr, ChannelFeed>) -> Self {
        Self::Mock(mock::Mock::new(feeds))
    }

    /// Fetches and parses the feed of a channel.
    ///
    /// # Errors
    /// [`FeedError::Fetch`] when the upstream cannot be reached or answers
    /// with a non-2xx status, [`FeedError::Parse`] when the body is not an
    /// Atom feed.
    pub async fn get_channel_feed(&self, channel_id: ArcStr) -> Result<ChannelFeed, FeedError> {
        match self {
            YouTubeApi::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetChannelFeed { channel_id, tx })
                    .await
                    .context("Sending message to YouTubeApi actor")
                    .map_err(FeedError::Fetch)?;
                rx.await
                    .context("Receiving response from YouTubeApi actor")
                    .map_err(FeedError::Fetch)?
            }
            YouTubeApi::Mock(mock) => mock.get_channel_feed(&channel_id),
        }
    }
}
