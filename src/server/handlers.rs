use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::{AppState, ProxyError, SCOPE};
use crate::{ArcStr, transform};

pub const BANNER: &str = "YouTube RSS Proxy is running. Use /api/rss?channel_id=...";
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Query string of `/api/rss`, as raw pairs so a repeated `channel_id`
/// is not rejected.
pub type RssQuery = Vec<(String, String)>;

pub async fn index() -> &'static str {
    BANNER
}

/// Serves the RSS rendition of a channel, from the cache while it is fresh.
pub async fn rss(
    State(state): State<AppState>,
    Query(query): Query<RssQuery>,
) -> Result<Response, ProxyError> {
    let channel_id = channel_id(query).ok_or(ProxyError::MissingChannelId)?;

    let document = match cached_or_fetch(&state, channel_id.clone()).await {
        Ok(document) => document,
        Err(err) => {
            state.log.error(SCOPE, format!("{channel_id}: {err}"));
            return Err(err);
        }
    };

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], document.to_string()).into_response())
}

/// The first non-empty `channel_id` in the query.
fn channel_id(query: RssQuery) -> Option<ArcStr> {
    query
        .into_iter()
        .find(|(key, value)| key == "channel_id" && !value.is_empty())
        .map(|(_, value)| ArcStr::from(value))
}

/// A cache failure is treated as a miss: the feed is fetched and the request
/// still succeeds.
async fn cached_or_fetch(state: &AppState, channel_id: ArcStr) -> Result<ArcStr, ProxyError> {
    if let Ok(Some(entry)) = state
        .log
        .warn_on_error(SCOPE, state.cache.get(channel_id.clone()).await)
    {
        return Ok(entry.document);
    }

    let feed = state.youtube.get_channel_feed(channel_id.clone()).await?;
    let document = transform::render_channel(&channel_id, &feed).map_err(ProxyError::Render)?;
    let fetched_at = Utc::now();

    state.log.info(
        SCOPE,
        format!("Refreshed {channel_id} ({} items)", feed.entries.len()),
    );
    let _ = state.log.warn_on_error(
        SCOPE,
        state
            .cache
            .put(channel_id, document.clone(), fetched_at)
            .await,
    );

    Ok(document)
}
