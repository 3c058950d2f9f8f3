use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::youtube::FeedError;

/// Why a proxy request failed.
///
/// Only the missing parameter is reported to the client as such. Everything
/// else collapses into one generic 500 body; the detail goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing channel_id parameter")]
    MissingChannelId,
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("failed to render RSS document: {0:#}")]
    Render(anyhow::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingChannelId => StatusCode::BAD_REQUEST,
            ProxyError::Feed(_) | ProxyError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match self {
            ProxyError::MissingChannelId => "Missing channel_id parameter",
            ProxyError::Feed(_) | ProxyError::Render(_) => "Failed to fetch or parse feed",
        };
        (self.status(), body).into_response()
    }
}
