use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::ArcStr;

/// What the mock answers for a given URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// A 200 response with this body
    Body(ArcStr),
    /// A response with this non-2xx status code
    Status(u16),
}

/// Mock implementation of the Net actor for testing purposes.
///
/// Answers from a fixed URL map and records every requested URL, so tests
/// can count upstream fetches.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    responses: Arc<Mutex<HashMap<ArcStr, MockResponse>>>,
    requests: Arc<Mutex<Vec<ArcStr>>>,
}

impl Mock {
    pub fn new(responses: HashMap<ArcStr, MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Default::default(),
        }
    }

    /// Sets or replaces the response for `url`.
    pub fn respond(&self, url: impl Into<ArcStr>, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url.into(), response);
        }
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<ArcStr> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub async fn get(&self, url: ArcStr) -> anyhow::Result<ArcStr> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.clone());
        }

        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(&url).cloned());
        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(status)) => {
                anyhow::bail!("GET request failed for URL: {url}: HTTP status {status}")
            }
            None => anyhow::bail!("GET request not found in mock responses: {url}"),
        }
    }
}
