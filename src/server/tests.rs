use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{TimeDelta, Utc};
use tower::ServiceExt;

use super::{AppState, BANNER, RSS_CONTENT_TYPE, router};
use crate::{
    ArcStr,
    api::youtube::{ChannelFeed, FeedEntry, YouTubeApi, parse},
    cache::{DEFAULT_TTL, FreshnessCache},
    log::{Log, LogLevel},
    net::{MockResponse, Net},
    transform,
};

const TWO_ENTRIES: &str = include_str!("../../samples/channel_two_entries.xml");
const SINGLE_ENTRY: &str = include_str!("../../samples/channel_single_entry.xml");
const EMPTY_ENTRIES: &str = include_str!("../../samples/channel_empty_entries.xml");

const UPSTREAM: &str = "http://upstream.test";
const CHANNEL: &str = "UC123";

fn upstream_url(channel_id: &str) -> ArcStr {
    ArcStr::from(parse::feed_url(UPSTREAM, channel_id).unwrap().as_str())
}

fn net_with(response: MockResponse) -> Net {
    Net::mock(HashMap::from([(upstream_url(CHANNEL), response)]))
}

fn state_with(net: Net, cache: FreshnessCache) -> AppState {
    AppState::new(
        cache,
        YouTubeApi::spawn(net, ArcStr::from(UPSTREAM)),
        Log::mock(),
    )
}

async fn send(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (
        status,
        content_type,
        String::from_utf8(body.to_vec()).unwrap(),
    )
}

#[tokio::test]
async fn test_banner() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(net, FreshnessCache::spawn(DEFAULT_TTL).unwrap()));

    let (status, content_type, body) = send(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, BANNER);
}

#[tokio::test]
async fn test_serves_rss_document() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(
        net.clone(),
        FreshnessCache::spawn(DEFAULT_TTL).unwrap(),
    ));

    let (status, content_type, body) = send(&app, "/api/rss?channel_id=UC123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(RSS_CONTENT_TYPE));
    assert!(body.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));

    let channel = rss::Channel::read_from(body.as_bytes()).unwrap();
    assert_eq!(channel.title(), "Test Channel");
    assert_eq!(channel.link(), "https://www.youtube.com/channel/UC123");
    assert_eq!(channel.items().len(), 2);
    assert_eq!(
        channel.items()[0].guid().map(|guid| guid.value()),
        Some("https://www.youtube.com/watch?v=abc123")
    );
    assert_eq!(net.requests().unwrap(), vec![upstream_url(CHANNEL)]);
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let cache = FreshnessCache::spawn(DEFAULT_TTL).unwrap();
    let app = router(state_with(net.clone(), cache.clone()));

    let (_, _, first) = send(&app, "/api/rss?channel_id=UC123").await;
    let (status, _, second) = send(&app, "/api/rss?channel_id=UC123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(net.requests().unwrap().len(), 1);
    assert_eq!(cache.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_zero_window_refetches_every_time() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(
        net.clone(),
        FreshnessCache::spawn(std::time::Duration::ZERO).unwrap(),
    ));

    send(&app, "/api/rss?channel_id=UC123").await;
    send(&app, "/api/rss?channel_id=UC123").await;
    assert_eq!(net.requests().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stale_entry_is_replaced() {
    let net = net_with(MockResponse::Body(ArcStr::from(SINGLE_ENTRY)));
    let cache = FreshnessCache::spawn(DEFAULT_TTL).unwrap();
    let stale_at = Utc::now() - TimeDelta::hours(2);
    cache
        .put(ArcStr::from(CHANNEL), ArcStr::from("stale"), stale_at)
        .await
        .unwrap();
    let app = router(state_with(net.clone(), cache.clone()));

    let (status, _, body) = send(&app, "/api/rss?channel_id=UC123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Solo Channel"));
    assert_eq!(net.requests().unwrap().len(), 1);

    let entry = cache.get(ArcStr::from(CHANNEL)).await.unwrap().unwrap();
    assert!(entry.fetched_at > stale_at);
    assert_eq!(&*entry.document, body);
}

#[tokio::test]
async fn test_refresh_picks_up_upstream_changes() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(
        net.clone(),
        FreshnessCache::spawn(std::time::Duration::ZERO).unwrap(),
    ));

    let (_, _, first) = send(&app, "/api/rss?channel_id=UC123").await;
    if let Net::Mock(mock) = &net {
        mock.respond(
            upstream_url(CHANNEL),
            MockResponse::Body(ArcStr::from(SINGLE_ENTRY)),
        );
    }
    let (_, _, second) = send(&app, "/api/rss?channel_id=UC123").await;

    assert_ne!(first, second);
    let channel = rss::Channel::read_from(second.as_bytes()).unwrap();
    assert_eq!(channel.items().len(), 1);
}

#[tokio::test]
async fn test_repeated_channel_id_uses_first_value() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(
        net.clone(),
        FreshnessCache::spawn(DEFAULT_TTL).unwrap(),
    ));

    for uri in [
        "/api/rss?channel_id=UC123&channel_id=UC123",
        "/api/rss?channel_id=&channel_id=UC123",
        "/api/rss?channel_id=UC123&channel_id=UCother",
    ] {
        let (status, content_type, body) = send(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(content_type.as_deref(), Some(RSS_CONTENT_TYPE));
        let channel = rss::Channel::read_from(body.as_bytes()).unwrap();
        assert_eq!(channel.link(), "https://www.youtube.com/channel/UC123");
    }
    assert_eq!(net.requests().unwrap(), vec![upstream_url(CHANNEL)]);
}

#[tokio::test]
async fn test_empty_entries_are_skipped() {
    let net = net_with(MockResponse::Body(ArcStr::from(EMPTY_ENTRIES)));
    let app = router(state_with(net, FreshnessCache::spawn(DEFAULT_TTL).unwrap()));

    let (status, _, body) = send(&app, "/api/rss?channel_id=UC123").await;
    assert_eq!(status, StatusCode::OK);
    let channel = rss::Channel::read_from(body.as_bytes()).unwrap();
    assert_eq!(channel.title(), "Gappy Channel");
    assert_eq!(channel.items().len(), 1);
    assert_eq!(channel.items()[0].title(), Some("Kept Video"));
}

#[tokio::test]
async fn test_missing_channel_id_is_rejected() {
    let net = net_with(MockResponse::Body(ArcStr::from(TWO_ENTRIES)));
    let app = router(state_with(
        net.clone(),
        FreshnessCache::spawn(DEFAULT_TTL).unwrap(),
    ));

    for uri in [
        "/api/rss",
        "/api/rss?channel_id=",
        "/api/rss?other=1",
        "/api/rss?channel_id=&channel_id=",
    ] {
        let (status, _, body) = send(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, "Missing channel_id parameter");
    }
    assert!(net.requests().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_errors_are_generic_500() {
    for response in [
        MockResponse::Status(404),
        MockResponse::Body(ArcStr::from("<feed><entry></feed>")),
        MockResponse::Body(ArcStr::from("<html><body>Not a feed</body></html>")),
    ] {
        let net = net_with(response);
        let log = Log::mock();
        let state = AppState::new(
            FreshnessCache::spawn(DEFAULT_TTL).unwrap(),
            YouTubeApi::spawn(net, ArcStr::from(UPSTREAM)),
            log.clone(),
        );
        let cache = state.cache.clone();
        let app = router(state);

        let (status, _, body) = send(&app, "/api/rss?channel_id=UC123").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to fetch or parse feed");
        assert_eq!(cache.len().await.unwrap(), 0);

        let errors: Vec<_> = log
            .messages()
            .unwrap()
            .into_iter()
            .filter(|message| message.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("UC123: "));
    }
}

#[tokio::test]
async fn test_channel_id_is_passed_through() {
    let feed = ChannelFeed {
        title: None,
        author: None,
        entries: vec![FeedEntry {
            video_id: None,
            title: None,
            link: None,
            published: None,
            author: ArcStr::from("YouTube Channel"),
            description: ArcStr::default(),
            thumbnail: None,
        }],
    };
    let channel_id = "UC with spaces";
    let state = AppState::new(
        FreshnessCache::spawn(DEFAULT_TTL).unwrap(),
        YouTubeApi::mock(HashMap::from([(ArcStr::from(channel_id), feed.clone())])),
        Log::mock(),
    );
    let app = router(state);

    let (status, _, body) = send(&app, "/api/rss?channel_id=UC%20with%20spaces").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        &*transform::render_channel(channel_id, &feed).unwrap()
    );
}
