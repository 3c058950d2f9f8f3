use std::env::VarError;

use tokio::sync::oneshot::Sender;

use crate::ArcStr;

/// Messages that can be sent to an [`Env`](super::Env) actor.
#[derive(Debug)]
pub enum Message {
    /// Gets an environment variable
    Get {
        tx: Sender<Result<Option<ArcStr>, VarError>>,
        key: ArcStr,
    },
}
