//! HTTP front end: a banner on `/` and the feed proxy on `/api/rss`.

use axum::{Router, routing::get};

use crate::{api::YouTubeApi, cache::FreshnessCache, log::Log};

mod error;
mod handlers;
#[cfg(test)]
mod tests;

pub use error::ProxyError;
pub use handlers::{BANNER, RSS_CONTENT_TYPE, RssQuery};

const SCOPE: &str = "server";

/// Handles shared by every request.
///
/// Each field is an actor handle, so cloning the state per request only
/// clones channel senders.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: FreshnessCache,
    pub youtube: YouTubeApi,
    pub log: Log,
}

impl AppState {
    pub fn new(cache: FreshnessCache, youtube: YouTubeApi, log: Log) -> Self {
        Self {
            cache,
            youtube,
            log,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/rss", get(handlers::rss))
        .with_state(state)
}
