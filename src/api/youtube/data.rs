use chrono::{DateTime, Utc};

use crate::ArcStr;

/// Used for the channel title and for entry authors when the feed has none.
pub const PLACEHOLDER_NAME: &str = "YouTube Channel";

/// A channel's upload feed, as published upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelFeed {
    /// The channel title, if the feed carries a non-empty one
    pub title: Option<ArcStr>,
    /// The feed-level author name
    pub author: Option<ArcStr>,
    /// Entries in document order
    pub entries: Vec<FeedEntry>,
}

/// One uploaded video.
///
/// `author` and `description` are always resolved; everything else may be
/// missing from the upstream entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub video_id: Option<ArcStr>,
    pub title: Option<ArcStr>,
    pub link: Option<ArcStr>,
    pub published: Option<DateTime<Utc>>,
    pub author: ArcStr,
    pub description: ArcStr,
    /// Present whenever `video_id` is
    pub thumbnail: Option<ArcStr>,
}

/// Why a channel feed could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The upstream request failed or answered with a non-2xx status
    #[error("failed to fetch channel feed: {0:#}")]
    Fetch(anyhow::Error),
    /// The upstream body is not an Atom feed
    #[error("failed to parse channel feed: {0:#}")]
    Parse(anyhow::Error),
}
