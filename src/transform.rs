//! RSS 2.0 rendering of channel feeds.
//!
//! Pure functions: a [`ChannelFeed`] goes in, a pretty-printed RSS document
//! with Media RSS thumbnails comes out.

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rss::{
    ChannelBuilder, GuidBuilder, Item, ItemBuilder,
    extension::{Extension, ExtensionMap},
};

use crate::{
    ArcStr,
    api::youtube::{ChannelFeed, FeedEntry, data::PLACEHOLDER_NAME},
};


pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

/// Public page of a channel. The id is used verbatim.
pub fn channel_link(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

/// Formats a timestamp the way RSS `pubDate` expects it, always in GMT.
pub fn format_pub_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Renders a channel feed as an RSS 2.0 document.
///
/// Every entry becomes an `<item>`, in feed order. Values the entry does not
/// have are left out of the item rather than written as empty tags.
///
/// # Errors
/// Fails only if the XML writer does.
pub fn render_channel(channel_id: &str, feed: &ChannelFeed) -> anyhow::Result<ArcStr> {
    let title = feed.title.as_deref().unwrap_or(PLACEHOLDER_NAME);
    let items: Vec<Item> = feed.entries.iter().map(entry_to_item).collect();

    let channel = ChannelBuilder::default()
        .namespaces(BTreeMap::from([
            ("atom".to_string(), ATOM_NAMESPACE.to_string()),
            ("media".to_string(), MEDIA_NAMESPACE.to_string()),
        ]))
        .title(title)
        .link(channel_link(channel_id))
        .description(format!("YouTube RSS feed for {title}"))
        .items(items)
        .build();

    let buffer = channel
        .pretty_write_to(Vec::new(), b' ', 2)
        .context("Writing RSS document")?;
    let document = String::from_utf8(buffer).context("RSS document is not UTF-8")?;
    Ok(ArcStr::from(document))
}

fn entry_to_item(entry: &FeedEntry) -> Item {
    let mut item = ItemBuilder::default();
    item.title(entry.title.as_deref().map(str::to_string))
        .link(entry.link.as_deref().map(str::to_string))
        .description(entry.description.to_string())
        .author(entry.author.to_string())
        .pub_date(entry.published.map(format_pub_date));

    if let Some(link) = entry.link.as_deref() {
        item.guid(GuidBuilder::default().permalink(true).value(link).build());
    }
    if let Some(thumbnail) = entry.thumbnail.as_deref() {
        item.extensions(thumbnail_extension(thumbnail));
    }

    item.build()
}

/// `<media:thumbnail url="..."/>` as an item extension.
fn thumbnail_extension(url: &str) -> ExtensionMap {
    let thumbnail = Extension {
        name: "media:thumbnail".to_string(),
        attrs: BTreeMap::from([("url".to_string(), url.to_string())]),
        ..Default::default()
    };

    BTreeMap::from([(
        "media".to_string(),
        BTreeMap::from([("thumbnail".to_string(), vec![thumbnail])]),
    )])
}
