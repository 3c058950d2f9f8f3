use std::{collections::HashMap, time::Duration};

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::{ArcStr, log::Log};

mod core;
mod message;
mod mock;

use message::Message;
pub use mock::MockResponse;

/// The networking actor that provides a thread-safe interface for network operations.
///
/// This enum represents either a real networking actor or a mock implementation
/// for testing purposes.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(None, log)?;
/// let body = net.get(url).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

impl Net {
    /// Creates a new networking instance and spawns its actor.
    ///
    /// # Arguments
    /// * `timeout` - Upper bound for a whole request, `None` waits forever
    /// * `log` - The logging actor
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn spawn(timeout: Option<Duration>, log: Log) -> anyhow::Result<Self> {
        let (net, _) = core::Core::build(timeout, log)?.spawn();
        Ok(net)
    }

    /// Creates a new mock networking instance answering from `responses`.
    pub fn mock(responses: HashMap<ArcStr, MockResponse>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Performs an HTTP GET request and returns the response body.
    ///
    /// # Errors
    /// Fails on transport errors, on non-2xx statuses and when the actor is gone.
    pub async fn get(&self, url: ArcStr) -> anyhow::Result<ArcStr> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, tx })
                    .await
                    .context("Sending message to Net actor")?;
                rx.await.context("Awaiting response from Net actor")?
            }
            Net::Mock(mock) => mock.get(url).await,
        }
    }

    /// URLs requested through a mock, in order. `None` for a real actor.
    pub fn requests(&self) -> Option<Vec<ArcStr>> {
        match self {
            Net::Actual(_) => None,
            Net::Mock(mock) => Some(mock.requests()),
        }
    }
}
