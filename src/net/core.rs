use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{ArcStr, log::Log};

use super::{Net, message::Message};

const SCOPE: &str = "net";

/// The core of the networking system that handles HTTP requests.
///
/// Wraps a pooled `reqwest` client. Each request runs on its own task, so a
/// slow upstream never holds up the requests queued behind it.
#[derive(Debug)]
pub struct Core {
    log: Log,
    client: Client,
}

impl Core {
    /// Builds the HTTP client. A `timeout` of `None` lets requests wait
    /// for as long as the upstream takes.
    pub fn build(timeout: Option<Duration>, log: Log) -> anyhow::Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("ytrss/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Building the HTTP client")?;

        Ok(Self { log, client })
    }

    /// Transforms the networking core instance into an actor.
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, tx } => {
                        let client = self.client.clone();
                        let log = self.log.clone();
                        tokio::spawn(async move {
                            let response = get(&client, &log, &url)
                                .await
                                .with_context(|| format!("GET request failed for URL: {url}"));
                            let _ = tx.send(response);
                        });
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }
}

/// Fetches `url` and returns its body. Non-2xx statuses are errors.
async fn get(client: &Client, log: &Log, url: &str) -> anyhow::Result<ArcStr> {
    let response = client.get(url).send().await.context("Sending GET request")?;
    let status = response.status();
    log.info(SCOPE, format!("GET {url} -> {status}"));

    let response = response
        .error_for_status()
        .context("Upstream answered with an error status")?;
    let text = response.text().await.context("Reading response body")?;
    Ok(ArcStr::from(text))
}
