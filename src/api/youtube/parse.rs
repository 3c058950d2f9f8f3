use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde_xml_rs::SerdeXml;

use super::data::{ChannelFeed, FeedEntry, PLACEHOLDER_NAME};
use crate::ArcStr;

#[derive(Debug, Deserialize)]
struct Feed {
    title: Option<String>,
    author: Option<Author>,
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = "yt:videoId")]
    video_id: Option<String>,
    title: Option<String>,
    link: Option<Link>,
    published: Option<String>,
    author: Option<Author>,
    #[serde(rename = "media:group")]
    media_group: Option<MediaGroup>,
}

impl Entry {
    /// An `<entry/>` with none of the fields we read.
    fn is_empty(&self) -> bool {
        self.video_id.is_none()
            && self.title.is_none()
            && self.link.is_none()
            && self.published.is_none()
            && self.author.is_none()
            && self.media_group.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href")]
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaGroup {
    #[serde(rename = "media:description")]
    description: Option<String>,
}

/// Builds the upstream URL of a channel's feed. The id is percent-encoded.
///
/// # Errors
/// Fails if `upstream` is not a valid base URL.
pub fn feed_url(upstream: &str, channel_id: &str) -> anyhow::Result<Url> {
    let base = format!("{}/feeds/videos.xml", upstream.trim_end_matches('/'));
    Url::parse_with_params(&base, &[("channel_id", channel_id)])
        .with_context(|| format!("Invalid upstream URL: {upstream}"))
}

/// Thumbnail URL for a video.
pub fn thumbnail_url(video_id: &str) -> ArcStr {
    ArcStr::from(format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg"))
}

/// Parses an Atom channel feed.
///
/// Zero, one or many `<entry>` elements all yield a list; empty elements are
/// skipped. Entry fields that are missing or empty fall back to deterministic
/// defaults instead of failing.
///
/// # Errors
/// Fails on malformed XML and on documents whose root is not `<feed>`.
pub fn parse_channel_feed(xml: &str) -> anyhow::Result<ChannelFeed> {
    match root_element(xml) {
        Some("feed") => {}
        Some(other) => bail!("Expected a <feed> document, found <{other}>"),
        None => bail!("Upstream body is not an XML document"),
    }

    let feed: Feed = SerdeXml::new()
        .overlapping_sequences(true)
        .from_str(xml)
        .context("Failed to parse channel feed XML")?;

    let feed_author = feed.author.and_then(|author| non_empty(author.name));
    let entries = feed
        .entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(|entry| resolve_entry(entry, feed_author.as_ref()))
        .collect();

    Ok(ChannelFeed {
        title: non_empty(feed.title),
        author: feed_author,
        entries,
    })
}

fn resolve_entry(entry: Entry, feed_author: Option<&ArcStr>) -> FeedEntry {
    let video_id = non_empty(entry.video_id);
    let author = entry
        .author
        .and_then(|author| non_empty(author.name))
        .or_else(|| feed_author.cloned())
        .unwrap_or_else(|| ArcStr::from(PLACEHOLDER_NAME));
    let description = entry
        .media_group
        .and_then(|group| group.description)
        .map(ArcStr::from)
        .unwrap_or_default();

    FeedEntry {
        thumbnail: video_id.as_deref().map(thumbnail_url),
        video_id,
        title: entry.title.map(ArcStr::from),
        link: entry.link.and_then(|link| link.href).map(ArcStr::from),
        published: entry.published.as_deref().and_then(parse_timestamp),
        author,
        description,
    }
}

/// RFC 3339 timestamp in UTC, `None` when it does not parse.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|date| date.with_timezone(&Utc))
        .ok()
}

fn non_empty(text: Option<String>) -> Option<ArcStr> {
    text.filter(|text| !text.trim().is_empty()).map(ArcStr::from)
}

/// Name of the document's root element, skipping the prolog.
fn root_element(xml: &str) -> Option<&str> {
    let mut rest = xml.trim_start_matches('\u{feff}');
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("<?") {
            rest = after.split_once("?>")?.1;
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.split_once("-->")?.1;
        } else if let Some(after) = rest.strip_prefix("<!") {
            rest = after.split_once('>')?.1;
        } else {
            let after = rest.strip_prefix('<')?;
            let end = after
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(after.len());
            return Some(&after[..end]).filter(|name| !name.is_empty());
        }
    }
}
