use tokio::sync::oneshot::Sender;

use crate::ArcStr;

/// Messages that can be sent to a [`Net`](super::Net) actor.
#[derive(Debug)]
pub enum Message {
    /// Performs an HTTP GET request to the specified URL
    Get {
        url: ArcStr,
        tx: Sender<anyhow::Result<ArcStr>>,
    },
}
